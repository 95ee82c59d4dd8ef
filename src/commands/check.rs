use crate::commands::{self, SessionOptions};
use crate::error::Result;
use crate::ui;
use crate::ui::notices;

pub fn run(options: &SessionOptions) -> Result<()> {
    commands::session(options, |ctx, controller| {
        if controller.registry().is_empty() {
            ui::info("No plugin dependencies declared.");
            return Ok(());
        }

        let evaluation = controller.evaluate();
        notices::render(ctx, controller, &evaluation);

        ui::verbose(&format!(
            "Checked {} dependencies, {} notices",
            controller.registry().len(),
            evaluation.notices.len()
        ));

        Ok(())
    })
}
