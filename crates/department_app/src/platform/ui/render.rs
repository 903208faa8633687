use department_core::{
    AppViewModel, DepartmentCardView, DialogView, EmptyState, LoadingIndicator, Severity,
};

/// Renders the view model as plain text lines for the terminal.
pub fn render(view: &AppViewModel) -> Vec<String> {
    let mut lines = Vec::new();

    let mut header = String::from("== Departments ==");
    if !view.effective_query.is_empty() {
        header.push_str(&format!("  search: \"{}\"", view.effective_query));
    }
    if view.raw_query != view.effective_query {
        header.push_str(&format!("  (typing: \"{}\")", view.raw_query));
    }
    lines.push(header);

    if view.can_create {
        lines.push(if view.actions_enabled {
            "[add]".to_string()
        } else {
            "[add] (disabled)".to_string()
        });
    }

    if let Some(error) = &view.error {
        lines.push(format!("! {error}"));
    }

    match view.loading {
        LoadingIndicator::FullPage => lines.push("Loading departments...".to_string()),
        LoadingIndicator::Inline => lines.push("(refreshing)".to_string()),
        LoadingIndicator::Hidden => {}
    }

    for card in &view.cards {
        lines.push(render_card(card, view.actions_enabled));
        if let Some(description) = &card.description {
            lines.push(format!("      {description}"));
        }
    }

    match view.empty_state {
        Some(EmptyState::NoMatches) => lines.push(format!(
            "No departments match \"{}\".",
            view.effective_query
        )),
        Some(EmptyState::NoDepartments) => lines.push("No departments yet.".to_string()),
        None => {}
    }

    if view.show_pagination {
        lines.push(format!("< page {} of {} >", view.page, view.total_pages));
    }

    match &view.dialog {
        DialogView::Closed => {}
        DialogView::Form { department: None } => {
            lines.push("-- New department: `save <name> [| <description>]` or `cancel`".to_string())
        }
        DialogView::Form {
            department: Some(department),
        } => lines.push(format!(
            "-- Editing \"{}\" (#{}): `save <name> [| <description>]` or `cancel`",
            department.name, department.id
        )),
        DialogView::ConfirmDelete { department, busy } => {
            if *busy {
                lines.push(format!("-- Deleting \"{}\"...", department.name));
            } else {
                lines.push(format!(
                    "-- Delete \"{}\" (#{})? `confirm` or `cancel`",
                    department.name, department.id
                ));
            }
        }
    }

    if let Some(notification) = &view.notification {
        let label = match notification.severity {
            Severity::Success => "ok",
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        };
        lines.push(format!("* [{label}] {}", notification.message));
    }

    lines
}

fn render_card(card: &DepartmentCardView, actions_enabled: bool) -> String {
    let mut line = format!("  #{:<4} {}", card.id, card.name);
    if let Some(moderator) = &card.moderator_login {
        line.push_str(&format!("  (moderator: {moderator})"));
    }
    if card.owned_by_me {
        line.push_str("  [owned by me]");
    }
    if actions_enabled {
        if card.can_edit {
            line.push_str("  [edit]");
        }
        if card.can_delete {
            line.push_str("  [delete]");
        }
    }
    line
}
