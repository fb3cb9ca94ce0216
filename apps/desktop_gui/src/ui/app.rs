use std::time::{Duration, Instant};

use arboard::Clipboard;
use client_core::{
    ClipboardSink, FormField, Phase, RequestController, ShortenError, SubmitTicket,
};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{describe_health, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;

const IDLE_REPAINT_INTERVAL: Duration = Duration::from_millis(100);
const CARD_MAX_WIDTH: f32 = 620.0;

#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub api_base_url: String,
}

/// Keeps one clipboard handle alive; on some Linux setups the copied text
/// disappears as soon as the owning handle is dropped.
#[derive(Default)]
struct ArboardClipboard {
    inner: Option<Clipboard>,
}

impl ClipboardSink for ArboardClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), String> {
        if self.inner.is_none() {
            self.inner = Some(Clipboard::new().map_err(|err| err.to_string())?);
        }
        let clipboard = self
            .inner
            .as_mut()
            .ok_or_else(|| "clipboard unavailable".to_string())?;
        clipboard
            .set_text(text.to_string())
            .map_err(|err| err.to_string())
    }
}

fn server_environment_label(server_url: &str) -> &'static str {
    let server = server_url.to_ascii_lowercase();
    if server.contains("127.0.0.1") || server.contains("localhost") {
        "Local"
    } else if server.contains("staging") {
        "Staging"
    } else if server.contains("dev") {
        "Development"
    } else {
        "Production"
    }
}

pub struct ShortlyApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,

    controller: RequestController,
    clipboard: ArboardClipboard,

    api_base_url: String,
    status: String,
    service_health: Option<String>,
}

impl ShortlyApp {
    pub fn bootstrap(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        startup: StartupConfig,
    ) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            controller: RequestController::new(),
            clipboard: ArboardClipboard::default(),
            api_base_url: startup.api_base_url,
            status: "Starting".to_string(),
            service_health: None,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => {
                    self.status = message;
                }
                UiEvent::ShortenCompleted { id, outcome } => {
                    if !self.controller.complete(id, outcome) {
                        tracing::debug!(request_id = id.0, "ignored response for stale request");
                    }
                }
                UiEvent::HealthChecked(result) => {
                    self.service_health = Some(describe_health(&result));
                }
            }
        }
    }

    fn send_ticket(&mut self, ticket: Option<SubmitTicket>) {
        let Some(ticket) = ticket else {
            return;
        };
        let id = ticket.id;
        if !dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::Shorten { ticket },
            &mut self.status,
        ) {
            self.controller
                .complete(id, Err(ShortenError::Interrupted(self.status.clone())));
        }
    }

    fn form_text_field(
        ui: &mut egui::Ui,
        id: &'static str,
        label: &str,
        hint: &str,
        value: &mut String,
    ) -> egui::Response {
        ui.label(egui::RichText::new(label).strong());
        let edit = egui::TextEdit::singleline(value)
            .id_salt(id)
            .hint_text(hint)
            .desired_width(f32::INFINITY);
        ui.add_sized([ui.available_width(), 34.0], edit)
    }

    fn show_form(&mut self, ui: &mut egui::Ui) {
        let url_resp = Self::form_text_field(
            ui,
            "shorten_url",
            "Original URL",
            "https://example.com/very-long-url",
            &mut self.controller.url,
        );
        ui.add_space(6.0);
        let code_resp = Self::form_text_field(
            ui,
            "shorten_custom_code",
            "Custom Short Code (optional)",
            "my-custom-link",
            &mut self.controller.custom_code,
        );
        ui.small(
            egui::RichText::new("Leave empty to auto-generate a short code (about 6 characters)")
                .weak(),
        );

        // Single-line edits give up focus on Enter, so that is the signal.
        let enter_pressed = ui.input(|i| i.key_pressed(egui::Key::Enter));
        let focus = if enter_pressed && url_resp.lost_focus() {
            Some(FormField::Url)
        } else if enter_pressed && code_resp.lost_focus() {
            Some(FormField::CustomCode)
        } else {
            None
        };
        let ticket = self.controller.confirm_key(focus);
        self.send_ticket(ticket);

        ui.add_space(10.0);
        let label = if self.controller.is_submitting() {
            "Shortening..."
        } else {
            "Shorten URL"
        };
        let button = egui::Button::new(egui::RichText::new(label).strong().size(16.0))
            .min_size(egui::vec2(ui.available_width(), 40.0));
        ui.horizontal(|ui| {
            if ui.add_enabled(self.controller.can_submit(), button).clicked() {
                let ticket = self.controller.submit();
                self.send_ticket(ticket);
            }
        });
        if self.controller.is_submitting() {
            ui.vertical_centered(|ui| {
                ui.spinner();
            });
        }
    }

    /// The result card carries its own reset, so only a failed request
    /// needs one next to the banner.
    fn offers_start_over(&self) -> bool {
        matches!(self.controller.phase(), Phase::Error { .. })
    }

    fn show_error_banner(&mut self, ui: &mut egui::Ui) {
        let Some(message) = self.controller.error_message().map(str::to_string) else {
            return;
        };
        let offers_start_over = self.offers_start_over();
        let mut start_over = false;
        ui.add_space(10.0);
        egui::Frame::NONE
            .fill(egui::Color32::from_rgb(111, 53, 53))
            .stroke(egui::Stroke::new(1.0, egui::Color32::from_rgb(175, 96, 96)))
            .corner_radius(8.0)
            .inner_margin(egui::Margin::symmetric(10, 8))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(egui::RichText::new("Error").strong().color(egui::Color32::WHITE));
                ui.label(egui::RichText::new(message).color(egui::Color32::WHITE));
                if offers_start_over && ui.button("Start Over").clicked() {
                    start_over = true;
                }
            });
        if start_over {
            self.controller.reset();
        }
    }

    fn show_result(&mut self, ui: &mut egui::Ui, now: Instant) {
        let Some(result) = self.controller.result().cloned() else {
            return;
        };

        ui.add_space(10.0);
        egui::Frame::NONE
            .fill(egui::Color32::from_rgb(36, 74, 52))
            .stroke(egui::Stroke::new(1.0, egui::Color32::from_rgb(80, 150, 105)))
            .corner_radius(10.0)
            .inner_margin(egui::Margin::symmetric(14, 12))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.heading("URL Shortened Successfully!");
                ui.add_space(6.0);

                ui.label(egui::RichText::new("Shortened URL").strong());
                ui.horizontal(|ui| {
                    let mut shortened = result.shortened_url.as_str();
                    ui.add(
                        egui::TextEdit::singleline(&mut shortened)
                            .desired_width(ui.available_width() - 150.0),
                    );
                    if ui.button(self.controller.copy_label(now)).clicked() {
                        self.controller.copy_result(&mut self.clipboard);
                    }
                    ui.add(
                        egui::Hyperlink::from_label_and_url("Open ↗", &result.shortened_url)
                            .open_in_new_tab(true),
                    );
                });

                ui.add_space(6.0);
                ui.label(egui::RichText::new("Original URL").strong());
                ui.add(egui::Label::new(&result.original_url).wrap());

                ui.add_space(8.0);
                let reset = egui::Button::new("Shorten Another URL")
                    .min_size(egui::vec2(ui.available_width(), 32.0));
                if ui.add(reset).clicked() {
                    self.controller.reset();
                }
            });
    }

    fn show_features(ui: &mut egui::Ui) {
        ui.columns(3, |columns| {
            for (column, (title, blurb)) in columns.iter_mut().zip([
                ("Fast", "Instant URL shortening"),
                ("Custom", "Create custom short codes"),
                ("Reliable", "Backed by a persistent store"),
            ]) {
                column.vertical_centered(|ui| {
                    ui.label(egui::RichText::new(title).strong());
                    ui.small(egui::RichText::new(blurb).weak());
                });
            }
        });
    }

    fn show_footer(&mut self, ui: &mut egui::Ui) {
        ui.separator();
        ui.horizontal_wrapped(|ui| {
            ui.small(format!(
                "Service: {} ({})",
                server_environment_label(&self.api_base_url),
                self.api_base_url
            ));
            if ui.small_button("Check").clicked() {
                dispatch_backend_command(
                    &self.cmd_tx,
                    BackendCommand::CheckHealth,
                    &mut self.status,
                );
            }
            if let Some(health) = &self.service_health {
                ui.small(egui::RichText::new(health).weak());
            }
        });
        ui.horizontal_wrapped(|ui| {
            ui.small("Status:");
            ui.small(egui::RichText::new(&self.status).weak());
        });
    }

    fn show_main(&mut self, ctx: &egui::Context, now: Instant) {
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.set_max_width(CARD_MAX_WIDTH);
                    ui.add_space(24.0);
                    ui.heading("URL Shortener");
                    ui.weak("Transform long URLs into short, shareable links");
                    ui.add_space(16.0);
                });

                ui.vertical(|ui| {
                    ui.set_max_width(CARD_MAX_WIDTH);
                    egui::Frame::NONE
                        .fill(ui.visuals().faint_bg_color)
                        .corner_radius(14.0)
                        .stroke(egui::Stroke::new(
                            1.0,
                            ui.visuals().widgets.noninteractive.bg_stroke.color,
                        ))
                        .inner_margin(egui::Margin::symmetric(20, 18))
                        .show(ui, |ui| {
                            self.show_form(ui);
                            self.show_error_banner(ui);
                            self.show_result(ui, now);
                        });

                    ui.add_space(14.0);
                    Self::show_features(ui);
                    ui.add_space(10.0);
                    self.show_footer(ui);
                });
            });
        });
    }
}

impl eframe::App for ShortlyApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.process_ui_events();
        self.controller.tick(now);

        self.show_main(ctx, now);

        let next_repaint = self
            .controller
            .copy_feedback_remaining(now)
            .map_or(IDLE_REPAINT_INTERVAL, |left| left.min(IDLE_REPAINT_INTERVAL));
        ctx.request_repaint_after(next_repaint);
    }
}
