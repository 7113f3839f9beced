//! Plain-text rendering of checklist views.

use checklist_core::{ChecklistView, ItemCard, ALL_SUBJECTS};

const SEPARATOR: &str = "---";
const EMPTY_MESSAGE: &str = "No items to display.";

/// Renders every card followed by a separator line.
pub fn render_view(view: &ChecklistView) -> String {
    if view.cards.is_empty() {
        return format!("{EMPTY_MESSAGE}\n");
    }

    view.cards.iter().map(render_card).collect()
}

/// Renders the subject filter choices, sentinel first.
pub fn render_subjects(subjects: &[String]) -> String {
    std::iter::once(ALL_SUBJECTS)
        .chain(subjects.iter().map(String::as_str))
        .map(|subject| format!("{subject}\n"))
        .collect()
}

fn render_card(card: &ItemCard) -> String {
    let item = &card.item;
    let marker = if item.is_done() {
        "[x] Done".to_string()
    } else {
        format!("[ ] mark with `checklist done {}`", item.id)
    };

    [
        format!("Id: {}", item.id),
        format!("Title: {}", item.title),
        format!("Description: {}", item.description),
        format!("Subject: {}", item.subject),
        format!("Deadline: {}", item.deadline.format("%Y-%m-%d %H:%M UTC")),
        format!("Time Remaining: {}", card.countdown),
        format!("State: {}", item.state),
        marker,
        SEPARATOR.to_string(),
    ]
    .iter()
    .map(|line| format!("{line}\n"))
    .collect()
}
