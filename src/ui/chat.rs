//! Chat window rendering and interaction.

use crate::core::{ChatMessage, Sender};
use eframe::egui;

pub const CHAT_WINDOW_WIDTH: f32 = 340.0;
pub const CHAT_MESSAGES_HEIGHT: f32 = 320.0;
pub const CHAT_MARGIN: f32 = 20.0;
/// Space reserved under the window for the launcher button.
pub const LAUNCHER_CLEARANCE: f32 = 70.0;

/// What the user did inside the chat window this frame.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ChatInput {
    pub submit: bool,
    pub close: bool,
}

/// Renders the message list with the typing indicator at the bottom.
pub fn draw_messages(ui: &mut egui::Ui, owner: &str, messages: &[ChatMessage], typing: bool) {
    egui::ScrollArea::vertical()
        .id_salt("chat_messages")
        .max_height(CHAT_MESSAGES_HEIGHT)
        .auto_shrink([false, false])
        .stick_to_bottom(true)
        .show(ui, |ui| {
            if messages.is_empty() {
                ui.weak(format!("Hi! Ask me anything about {owner}."));
            }

            for msg in messages {
                let (author, fill) = match msg.sender() {
                    Sender::User => ("You", ui.visuals().selection.bg_fill),
                    Sender::Bot => ("Assistant", ui.visuals().faint_bg_color),
                };

                ui.horizontal(|ui| {
                    ui.small(author);
                    ui.small(msg.sent_at().format("%H:%M").to_string());
                });
                egui::Frame::new()
                    .fill(fill)
                    .corner_radius(6.0)
                    .inner_margin(8.0)
                    .show(ui, |ui| {
                        ui.label(msg.text());
                    });
                ui.add_space(6.0);
            }

            if typing {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.weak("typing…");
                });
            }
        });
}

/// Renders the input row. `send_enabled` only gates the button; Enter is
/// always forwarded and the router decides.
pub fn draw_input_row(
    ui: &mut egui::Ui,
    input_text: &mut String,
    send_enabled: bool,
    focus: bool,
) -> bool {
    let mut submit = false;

    ui.horizontal(|ui| {
        let response = ui.add(
            egui::TextEdit::singleline(input_text)
                .hint_text("Type your message…")
                .desired_width(CHAT_WINDOW_WIDTH - 80.0),
        );
        if focus {
            response.request_focus();
        }

        // Enter submits, Shift+Enter does not.
        if response.lost_focus()
            && ui.input(|i| i.key_pressed(egui::Key::Enter) && !i.modifiers.shift)
        {
            submit = true;
            response.request_focus();
        }

        if ui.add_enabled(send_enabled, egui::Button::new("Send")).clicked() {
            submit = true;
        }
    });

    submit
}

/// Floating chat window anchored above the launcher. Returns the user's
/// actions and the window's screen rect.
pub fn show_window(
    ctx: &egui::Context,
    owner: &str,
    messages: &[ChatMessage],
    typing: bool,
    input_text: &mut String,
    send_enabled: bool,
    focus: bool,
) -> (ChatInput, Option<egui::Rect>) {
    let mut input = ChatInput::default();

    let shown = egui::Window::new(format!("Chat with {owner}"))
        .id(egui::Id::new("chat_window"))
        .collapsible(false)
        .resizable(false)
        .title_bar(false)
        .default_width(CHAT_WINDOW_WIDTH)
        .anchor(
            egui::Align2::RIGHT_BOTTOM,
            [-CHAT_MARGIN, -(CHAT_MARGIN + LAUNCHER_CLEARANCE)],
        )
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.strong(format!("🤖 Ask about {owner}"));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.small_button("✖").clicked() {
                        input.close = true;
                    }
                });
            });
            ui.separator();
            draw_messages(ui, owner, messages, typing);
            ui.separator();
            input.submit = draw_input_row(ui, input_text, send_enabled, focus);
        });

    (input, shown.map(|inner| inner.response.rect))
}

/// Round launcher button with the fading hint next to it. Returns whether it
/// was clicked and its screen rect.
pub fn show_launcher(
    ctx: &egui::Context,
    open: bool,
    hint_opacity: Option<f32>,
) -> (bool, egui::Rect) {
    let area = egui::Area::new(egui::Id::new("chat_launcher"))
        .order(egui::Order::Foreground)
        .anchor(egui::Align2::RIGHT_BOTTOM, [-CHAT_MARGIN, -CHAT_MARGIN])
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                if let Some(opacity) = hint_opacity.filter(|o| *o > 0.0) {
                    let color = ui.visuals().text_color().gamma_multiply(opacity);
                    ui.label(egui::RichText::new("Ask me anything →").color(color));
                }
                let icon = if open { "✖" } else { "🤖" };
                ui.add(egui::Button::new(egui::RichText::new(icon).size(26.0)).min_size(egui::vec2(52.0, 52.0)))
                    .clicked()
            })
            .inner
        });

    (area.inner, area.response.rect)
}
