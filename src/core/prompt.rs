/// Join conversation messages with single spaces
pub fn join_messages(messages: &[String]) -> String {
    messages.join(" ")
}

/// Wrap a conversation in the fixed summary instruction
pub fn build_summary_prompt(messages: &[String]) -> String {
    let conversation = join_messages(messages);
    format!(
        "Summarize the following conversation in user perspective for example \
         some users says like this while some says like that \n\n{}\n\nFormat it like: plain text",
        conversation
    )
}
