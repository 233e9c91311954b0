use crate::config::Config;
use crate::core::{ChatView, InputRouter, Resolver, Submission, Transcript, ViewEvent};
use crate::ui::chat;
use crate::ui::motion::{self, ChatWidget, SectionSpan, TimelineEntry, Typewriter};
use crate::ui::page::{self, SECTIONS};
use eframe::egui;
use std::sync::mpsc as std_mpsc;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Forwards router signals to the UI thread and wakes it up.
struct ChannelView {
    sender: std_mpsc::Sender<ViewEvent>,
    ctx: egui::Context,
}

impl ChatView for ChannelView {
    fn notify(&self, event: ViewEvent) {
        if let Err(e) = self.sender.send(event) {
            log::error!("UI channel closed: {}", e);
        }
        self.ctx.request_repaint();
    }
}

pub struct PortfolioApp {
    config: Config,
    router: InputRouter,
    events: std_mpsc::Receiver<ViewEvent>,
    input_text: String,
    typing: bool,
    send_enabled: bool,
    widget: ChatWidget,
    focus_input: bool,
    typewriter: Typewriter,
    timeline: Vec<TimelineEntry>,
    start_time: Instant,
    spans: Vec<SectionSpan>,
    active: Option<usize>,
    scrolled: bool,
    scroll_fraction: f32,
    pending_jump: Option<f32>,
}

impl PortfolioApp {
    pub fn new(config: Config, ctx: &egui::Context) -> Self {
        let (sender, receiver) = std_mpsc::channel();
        let view = Arc::new(ChannelView {
            sender,
            ctx: ctx.clone(),
        });
        let resolver = Arc::new(Resolver::new(config.resolver.clone()));
        let router = InputRouter::new(resolver, Transcript::new(), view);
        log::info!("🤖 Chatbot initialized (remote={})", config.resolver.is_remote());

        Self {
            typewriter: Typewriter::new(config.owner_name.clone()),
            timeline: page::timeline(),
            config,
            router,
            events: receiver,
            input_text: String::new(),
            typing: false,
            send_enabled: true,
            widget: ChatWidget::default(),
            focus_input: false,
            start_time: Instant::now(),
            spans: Vec::new(),
            active: None,
            scrolled: false,
            scroll_fraction: 0.0,
            pending_jump: None,
        }
    }

    fn process_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            match event {
                ViewEvent::TypingStarted => self.typing = true,
                ViewEvent::TypingFinished => self.typing = false,
                ViewEvent::SendEnabled(enabled) => self.send_enabled = enabled,
                // Messages are read straight from the transcript.
                ViewEvent::MessageAppended(_) => {}
            }
        }
    }

    fn send_message(&mut self) {
        match self.router.submit(&mut self.input_text) {
            Submission::Accepted(_) => {}
            Submission::Busy => log::debug!("Send ignored while a reply is pending"),
            Submission::Empty => {}
        }
    }

    fn draw_navbar(&mut self, ctx: &egui::Context) {
        let mut frame = egui::Frame::side_top_panel(&ctx.style());
        if self.scrolled {
            frame = frame.stroke(ctx.style().visuals.widgets.noninteractive.bg_stroke);
        }

        egui::TopBottomPanel::top("navbar").frame(frame).show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.strong(&self.config.owner_name);
                ui.add_space(24.0);
                for (index, section) in SECTIONS.iter().enumerate() {
                    let selected = self.active == Some(index);
                    if ui.selectable_label(selected, section.title).clicked() {
                        if let Some(span) = self.spans.get(index) {
                            log::debug!("🧭 Jump to #{}", section.id);
                            self.pending_jump = Some(motion::jump_target(*span));
                        }
                    }
                }
            });
        });
    }

    fn draw_page(&mut self, ctx: &egui::Context) {
        let elapsed = self.start_time.elapsed();
        let hero_name = self.typewriter.visible(elapsed).to_string();
        if !self.typewriter.is_done(elapsed) {
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            let mut area = egui::ScrollArea::vertical()
                .id_salt("page")
                .auto_shrink([false, false]);
            if let Some(offset) = self.pending_jump.take() {
                area = area.vertical_scroll_offset(offset);
            }

            let output = area.show(ui, |ui| page::draw_sections(ui, &hero_name, &mut self.timeline));

            let scroll_y = output.state.offset.y;
            let viewport_h = output.inner_rect.height();
            let content_h = output.content_size.y;

            self.spans = output.inner;
            self.active = motion::active_section(&self.spans, scroll_y, viewport_h, content_h);
            self.scrolled = motion::navbar_scrolled(scroll_y);
            self.scroll_fraction = motion::scroll_fraction(scroll_y, viewport_h, content_h);
        });
    }

    fn draw_chat(&mut self, ctx: &egui::Context) {
        let hint = self
            .widget
            .hint_visible()
            .then(|| motion::hint_opacity(self.scroll_fraction));
        let (launcher_clicked, launcher_rect) = chat::show_launcher(ctx, self.widget.is_open(), hint);

        let mut window_rect = None;
        if self.widget.is_open() {
            let messages = self.router.transcript().snapshot();
            let (input, rect) = chat::show_window(
                ctx,
                &self.config.owner_name,
                &messages,
                self.typing,
                &mut self.input_text,
                self.send_enabled,
                self.focus_input,
            );
            self.focus_input = false;
            window_rect = rect;

            if input.submit {
                self.send_message();
            }
            if input.close {
                self.widget.close();
            }
        }

        if launcher_clicked {
            let was_open = self.widget.is_open();
            self.widget.toggle();
            self.focus_input = !was_open && self.widget.is_open();
            return;
        }

        // Clicks elsewhere on the page close the widget.
        let click = ctx.input(|i| {
            if i.pointer.any_click() {
                i.pointer.interact_pos()
            } else {
                None
            }
        });
        if let Some(pos) = click {
            let inside = launcher_rect.contains(pos)
                || window_rect.is_some_and(|rect| rect.contains(pos));
            self.widget.click(inside);
        }
    }
}

impl eframe::App for PortfolioApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_events();
        self.draw_navbar(ctx);
        self.draw_page(ctx);
        self.draw_chat(ctx);
    }
}
