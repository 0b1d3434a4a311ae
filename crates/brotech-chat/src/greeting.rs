//! Page-aware greetings and canned quick replies.

use crate::message::Message;

/// Prompts offered before the visitor's first message.
pub const QUICK_REPLIES: [&str; 3] = [
    "What services do you offer?",
    "Tell me about your portfolio",
    "How can I get a quote?",
];

const DEFAULT_GREETING: &str = "Hello! I'm Tech Bro from BroTech Web Solutions. We specialize in web development, AI, and cybersecurity. How can I assist you today?";

/// Route substrings and their greetings, checked in order.
const ROUTE_GREETINGS: [(&str, &str); 3] = [
    (
        "/pricing",
        "Hey! Checking out our plans? I can help you pick the perfect one or break down the features. What's on your mind?",
    ),
    (
        "/services",
        "Exploring our services? Awesome! From AI chatbots to cybersecurity, I can give you the full scoop. Which service are you curious about?",
    ),
    (
        "/portfolio",
        "Cool projects, right? If a particular one catches your eye, let me know. We can build something just as awesome for you.",
    ),
];

/// Greeting text for `path`. First matching pattern wins.
pub fn select_greeting(path: &str) -> &'static str {
    ROUTE_GREETINGS
        .iter()
        .find(|(pattern, _)| path.contains(pattern))
        .map(|(_, text)| *text)
        .unwrap_or(DEFAULT_GREETING)
}

/// The greeting for `path` as a bot message.
pub fn contextual_greeting(path: &str) -> Message {
    Message::bot(select_greeting(path))
}
