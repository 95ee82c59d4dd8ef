//! Notice rendering
//!
//! Notices are regenerated every pass and shown only to users who may manage
//! plugins. Info and success notices the user dismissed stay hidden until the
//! dismissal expires; error notices always show.

use crate::core::lifecycle::{Controller, Evaluation};
use crate::core::types::{Action, Notice, NoticeStatus};
use crate::project_identity;
use crate::traits::AppContext;
use crate::ui;
use colored::Colorize;

const NOTICE_PREFIX: &str = "[Dependency]";
const PROTECTED_LABEL: &str = "Plugin dependency";

/// Notices that should reach the user right now.
pub fn visible<'n>(
    ctx: &AppContext,
    controller: &Controller<'_>,
    notices: &'n [Notice],
) -> Vec<&'n Notice> {
    if !ctx.permissions.can_manage_plugins() {
        return Vec::new();
    }

    notices
        .iter()
        .filter(|notice| {
            notice.status == NoticeStatus::Error
                || ctx
                    .dismissals
                    .is_notice_active(&controller.notice_dismiss_key(notice))
        })
        .collect()
}

pub fn render(ctx: &AppContext, controller: &Controller<'_>, evaluation: &Evaluation) {
    for notice in visible(ctx, controller, &evaluation.notices) {
        render_notice(notice);
    }

    if !evaluation.protected.is_empty() {
        ui::header("Protected plugins");
        for slug in &evaluation.protected {
            ui::indent(&format!("{} {}", slug, PROTECTED_LABEL.bright_black()), 1);
        }
    }
}

/// Single notice, e.g. the outcome of a router call.
pub fn render_notice(notice: &Notice) {
    if notice.message.is_empty() {
        return;
    }

    let line = format!("{} {}", NOTICE_PREFIX.bold(), notice.message);
    match notice.status {
        NoticeStatus::Error => ui::error(&line),
        NoticeStatus::Success => ui::success(&line),
        NoticeStatus::Info => {
            ui::info(&line);
            if let Some(action) = notice.action {
                ui::indent(
                    &format!(
                        "{} → {} {} {}",
                        action.label().cyan(),
                        project_identity::BINARY_NAME,
                        Action::from(action),
                        notice.slug
                    ),
                    2,
                );
            }
        }
    }
}
