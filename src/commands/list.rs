use crate::commands::{self, SessionOptions};
use crate::core::types::PluginState;
use crate::error::Result;
use crate::ui;
use crate::utils::sanitize::redact_token;
use colored::Colorize;

pub fn run(options: &SessionOptions) -> Result<()> {
    commands::session(options, |_ctx, controller| {
        if controller.registry().is_empty() {
            ui::info("No plugin dependencies declared.");
            return Ok(());
        }

        controller.resolve_all();

        ui::header(&format!(
            "Plugin dependencies ({})",
            controller.registry().len()
        ));

        for dep in controller.registry().all() {
            let state = controller.state_of(&dep.slug);
            let state_label = match state {
                PluginState::Active => state.to_string().green(),
                PluginState::InstalledInactive => state.to_string().yellow(),
                PluginState::NotInstalled => state.to_string().red(),
            };

            ui::separator();
            println!("{} {}", dep.name.bold(), format!("({})", dep.slug).bright_black());
            if dep.required && state == PluginState::Active {
                ui::indent(&"Plugin dependency".cyan().to_string(), 1);
            }
            ui::indent(&format!("host:     {}", dep.host), 1);
            ui::indent(
                &format!(
                    "required: {}",
                    if dep.required { "yes" } else { "no" }
                ),
                1,
            );
            ui::indent(&format!("state:    {}", state_label), 1);
            ui::indent(&format!("source:   {}", dep.source), 1);
            let link = dep
                .download_link
                .as_deref()
                .map(|link| redact_token(link, dep.token.as_deref()))
                .unwrap_or_else(|| "unresolved".to_string());
            ui::indent(&format!("link:     {}", link), 1);
        }

        Ok(())
    })
}
