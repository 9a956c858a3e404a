use egui::{Id, Ui, ViewportBuilder};
use egui_formula_editor::{
    Action, ColumnSelectConfig, FormulaEditor, FormulaEditorConfig, FormulaEditorHost,
    FormulaField, FormulaValidator, Preview, PreviewError,
};
use log::{debug, error};

fn main() -> eframe::Result<()> {
    // run with `RUST_LOG=egui_formula_editor=trace` to see trace logs
    env_logger::init();

    let native_options = eframe::NativeOptions {
        viewport: ViewportBuilder::default().with_inner_size([640.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "egui_formula_editor - Formula demo",
        native_options,
        Box::new(|_cc| Ok(Box::new(MyApp::default()))),
    )
}

/// Rejects formulas with unbalanced parentheses, everything else still needs the backend.
struct ParenthesesValidator;

impl FormulaValidator for ParenthesesValidator {
    fn validate(&self, formula: &str) -> Result<Preview, PreviewError> {
        let mut depth = 0_i32;
        for c in formula.chars() {
            match c {
                '(' => depth += 1,
                ')' => depth -= 1,
                _ => {}
            }
            if depth < 0 {
                return Err(PreviewError::Rejected("unexpected ')'".to_string()));
            }
        }

        match depth {
            0 => Ok(Preview::Pending),
            _ => Ok(Preview::Message(format!("{} unclosed '('", depth))),
        }
    }
}

fn config() -> FormulaEditorConfig {
    FormulaEditorConfig::new()
        .with_field(
            FormulaField::new()
                .columns("price,quantity,discount,tax_rate")
                .functions("sqrt,SUM,AVG"),
        )
        .with_standard_buttons()
        .with_column_select(ColumnSelectConfig::from_values([
            "price", "quantity", "discount", "tax_rate",
        ]))
}

struct MyApp {
    inspection: bool,
    strict: bool,

    host: FormulaEditorHost,
}

impl Default for MyApp {
    fn default() -> Self {
        let mut host = FormulaEditorHost::new();
        if let Err(e) = host.mount(&config()) {
            error!("unable to mount formula editor: {}", e);
        }

        Self {
            inspection: false,
            strict: false,
            host,
        }
    }
}

impl eframe::App for MyApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            self.top_panel_content(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.central_panel_content(ui);
        });

        // Inspection window
        egui::Window::new("🔍 Inspection")
            .open(&mut self.inspection)
            .vscroll(true)
            .show(ctx, |ui| {
                ctx.inspection_ui(ui);
            });
    }
}

impl MyApp {
    fn top_panel_content(&mut self, ui: &mut Ui) {
        egui::Sides::new().show(
            ui,
            |ui| {
                ui.label("Formula editor demo");
            },
            |ui| {
                ui.checkbox(&mut self.inspection, "🔍 Inspection");
            },
        );
    }

    fn central_panel_content(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            if ui.checkbox(&mut self.strict, "Check parentheses").changed() {
                if let Some(state) = self.host.state_mut() {
                    if self.strict {
                        state.set_validator(Box::new(ParenthesesValidator));
                    } else {
                        state.set_validator(Box::new(egui_formula_editor::PendingBackendValidator));
                    }
                }
            }

            if self.host.is_mounted() {
                if ui.button("Unmount").clicked() {
                    self.host.unmount();
                }
            } else if ui.button("Mount").clicked() {
                if let Err(e) = self.host.mount(&config()) {
                    error!("unable to mount formula editor: {}", e);
                }
                self.strict = false;
            }
        });

        ui.separator();

        let Some(state) = self.host.state_mut() else {
            ui.label("not mounted");
            return;
        };

        let (_response, actions) = FormulaEditor::new(Id::new("formula_1"))
            .desired_width(400.0)
            .hint_text("e.g. price * quantity")
            .show(ui, state);

        handle_actions(actions);
    }
}

fn handle_actions(actions: Vec<Action>) {
    for action in actions {
        debug!("action: {:?}", action);
    }
}
