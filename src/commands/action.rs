use crate::commands::{self, SessionOptions};
use crate::core::types::Action;
use crate::error::Result;
use crate::ui::notices;

/// Router entry point: prints the resulting message verbatim. Unknown
/// methods print nothing.
pub fn route(options: &SessionOptions, method: &str, slug: &str) -> Result<()> {
    commands::session(options, |_ctx, controller| {
        match controller.route(method, slug) {
            Some(message) if !message.is_empty() => println!("{}", message),
            _ => {}
        }
        Ok(())
    })
}

/// Typed shortcut for one action, rendered as a notice.
pub fn run(options: &SessionOptions, action: Action, slug: &str) -> Result<()> {
    commands::session(options, |_ctx, controller| {
        if let Some(notice) = controller.dispatch(action, slug) {
            notices::render_notice(&notice);
        }
        Ok(())
    })
}
