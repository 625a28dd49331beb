//! Plain-text feature views.

use snake_core::{
    ChatProps, HistoryProps, I18n, PersonaProps, Result, Screen, Sender, View, ViewProps,
    ViewRouter,
};

fn render_chat(props: ChatProps<'_>, i18n: &I18n) -> String {
    let Some(conversation) = props.active_conversation else {
        return i18n.t("chat.empty");
    };

    let mut out = format!("# {} ({})\n", conversation.title, conversation.id);
    if let Some(persona) = &conversation.persona {
        out.push_str(&format!("persona: {persona}\n"));
    }
    for message in &conversation.messages {
        let who = match message.sender {
            Sender::User => "you",
            Sender::Ai => "ai ",
        };
        out.push_str(&format!("{who} > {}\n", message.text));
    }
    out
}

fn render_history(props: HistoryProps<'_>, i18n: &I18n) -> String {
    if props.conversations.is_empty() {
        return i18n.t("history.empty");
    }

    let visible = props.visible();
    if visible.is_empty() {
        return i18n.format("history.no_matches", &[("query", props.query)]);
    }

    visible
        .iter()
        .map(|c| {
            let marker = if props.active_conversation_id == Some(&c.id) {
                '*'
            } else {
                ' '
            };
            format!("{marker} {}  {}  ({} messages)", c.id, c.title, c.messages.len())
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_persona(props: PersonaProps<'_>, i18n: &I18n) -> String {
    let current = props.current_persona.unwrap_or("-");
    format!("{}\ncurrent: {current}", i18n.t("persona.prompt"))
}

/// Router rendering every view as text.
pub fn text_router(i18n: &I18n) -> Result<ViewRouter<String>> {
    let chat_i18n = i18n.clone();
    let history_i18n = i18n.clone();
    let persona_i18n = i18n.clone();
    let labels = i18n.clone();

    ViewRouter::builder()
        .view(View::Chat, move |props: ViewProps<'_>| match props {
            ViewProps::Chat(chat) => render_chat(chat, &chat_i18n),
            other => format!("{:?}", other.view()),
        })
        .view(View::History, move |props: ViewProps<'_>| match props {
            ViewProps::History(history) => render_history(history, &history_i18n),
            other => format!("{:?}", other.view()),
        })
        .view(View::Persona, move |props: ViewProps<'_>| match props {
            ViewProps::Persona(persona) => render_persona(persona, &persona_i18n),
            other => format!("{:?}", other.view()),
        })
        .remaining(move |view| {
            let label = labels.view_label(view);
            move |_: ViewProps<'_>| format!("[{label}]")
        })
        .build()
}

/// Full screen as printed to the terminal.
pub fn render_screen(screen: Screen<String>, i18n: &I18n) -> String {
    match screen {
        Screen::Auth(auth) => format!("== {} ==\n{}", auth.title, auth.prompt),
        Screen::App { sidebar, main } => {
            let current = sidebar
                .active_item()
                .map(|item| item.label.clone())
                .unwrap_or_else(|| sidebar.current_view.to_string());
            let who = i18n.format(
                "sidebar.signed_in_as",
                &[("name", sidebar.user.name.as_str()), ("email", sidebar.user.email.as_str())],
            );
            format!("== {current} ==  {who}\n{main}")
        }
    }
}
