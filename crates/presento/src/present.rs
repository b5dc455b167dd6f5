//! Full-screen presenter window.
//!
//! Hosts the [`Player`] state machine: keyboard input drives it, and every move
//! is written back to the session as a `/view/<n>` route. Leaving playback
//! writes `/edit/<n>` for the slide that was on screen.

use std::path::PathBuf;

use eframe::egui;

use crate::commands::open_session;
use crate::config::Config;
use crate::deck::navigation::{self, ordinal};
use crate::deck::player::{Key, Player, PlayerEvent};
use crate::deck::slide::DEFAULT_IMAGE_SCALE;
use crate::deck::{ImageFit, Route, Slide, SlideBody};
use crate::session::Session;
use crate::storage::FileStore;
use crate::theme::Theme;

const PROGRESS_HEIGHT: f32 = 6.0;

struct PresenterApp {
    session: Session<FileStore>,
    player: Player,
    theme: Theme,
}

impl PresenterApp {
    fn new(session: Session<FileStore>, start: usize, theme: Theme) -> Self {
        let mut app = Self {
            session,
            player: Player::default(),
            theme,
        };
        let index = app.player.present(start, app.slide_count());
        app.follow(Route::view(index));
        app
    }

    fn slide_count(&self) -> usize {
        self.session.state().deck.len()
    }

    fn follow(&mut self, route: Route) {
        if let Err(e) = self.session.navigate(route) {
            log::warn!("Failed to record position: {e}");
        }
    }

    /// Returns true once playback has ended.
    fn handle(&mut self, key: Key) -> bool {
        match self.player.handle_key(key, self.slide_count()) {
            PlayerEvent::Moved(index) => {
                log::debug!("Showing slide {}", ordinal(index));
                self.follow(Route::view(index));
                false
            }
            PlayerEvent::Exited(index) => {
                self.follow(Route::edit(index));
                true
            }
            PlayerEvent::Unchanged => false,
        }
    }

    fn compute_scale(rect: egui::Rect) -> f32 {
        let ref_w = 1920.0;
        let ref_h = 1080.0;
        (rect.width() / ref_w).min(rect.height() / ref_h)
    }

    fn draw(&self, ui: &egui::Ui, rect: egui::Rect) {
        let scale = Self::compute_scale(rect);
        let len = self.slide_count();
        let index = self.player.current().unwrap_or(0);
        if let Some(slide) = self.session.state().deck.get(index) {
            draw_slide(ui, slide, &self.theme, rect, scale);
        }

        // Progress bar
        let progress = self.player.progress(len);
        let bar = egui::Rect::from_min_size(
            egui::pos2(rect.left(), rect.bottom() - PROGRESS_HEIGHT * scale),
            egui::vec2(rect.width() * progress, PROGRESS_HEIGHT * scale),
        );
        ui.painter().rect_filled(bar, 0.0, self.theme.accent);

        // Slide counter
        if let Some(counter) = self.player.counter(len) {
            let color = Theme::with_opacity(self.theme.foreground, 0.4);
            let galley = ui.painter().layout_no_wrap(
                counter,
                egui::FontId::monospace(16.0 * scale),
                color,
            );
            let pos = egui::pos2(
                rect.right() - galley.rect.width() - 24.0 * scale,
                rect.top() + 20.0 * scale,
            );
            ui.painter().galley(pos, galley, color);
        }
    }
}

/// Paint one slide. Notes are presenter-only and never drawn here.
fn draw_slide(ui: &egui::Ui, slide: &Slide, theme: &Theme, rect: egui::Rect, scale: f32) {
    let margin = 120.0 * scale;
    let width = rect.width() - margin * 2.0;
    let painter = ui.painter();
    let title = slide.title.as_deref().unwrap_or("");

    let text_block = |text: &str, size: f32, color: egui::Color32, top: f32| {
        let galley = painter.layout(
            text.to_string(),
            egui::FontId::proportional(size * scale),
            color,
            width,
        );
        let height = galley.rect.height();
        painter.galley(egui::pos2(rect.left() + margin, top), galley, color);
        top + height
    };

    match &slide.body {
        SlideBody::Title { content } => {
            let galley = painter.layout(
                title.to_string(),
                egui::FontId::proportional(theme.title_size * scale),
                theme.heading_color,
                width,
            );
            let top = rect.center().y - galley.rect.height();
            let pos = egui::pos2(rect.center().x - galley.rect.width() / 2.0, top);
            let bottom = top + galley.rect.height();
            painter.galley(pos, galley, theme.heading_color);
            if let Some(content) = content.as_deref().filter(|c| !c.is_empty()) {
                let galley = painter.layout(
                    content.to_string(),
                    egui::FontId::proportional(theme.body_size * scale),
                    theme.foreground,
                    width,
                );
                let pos = egui::pos2(
                    rect.center().x - galley.rect.width() / 2.0,
                    bottom + 32.0 * scale,
                );
                painter.galley(pos, galley, theme.foreground);
            }
        }
        SlideBody::Bullets { items } => {
            let mut top = text_block(title, theme.heading_size, theme.heading_color, margin);
            top += 48.0 * scale;
            for item in items {
                top = text_block(
                    &format!("\u{2022}  {item}"),
                    theme.body_size,
                    theme.foreground,
                    top,
                );
                top += 20.0 * scale;
            }
        }
        SlideBody::ImageCenter {
            content,
            image,
            fit,
            scale: image_scale,
        } => {
            let mut top = text_block(title, theme.heading_size, theme.heading_color, margin);
            top += 32.0 * scale;
            let percent = image_scale.unwrap_or(DEFAULT_IMAGE_SCALE) as f32 / 100.0;
            let available = egui::vec2(width, rect.bottom() - top - margin * 1.5);
            let size = (match fit.unwrap_or_default() {
                ImageFit::Fill => available,
                ImageFit::Contain | ImageFit::Cover => {
                    let side = available.x.min(available.y * 16.0 / 9.0);
                    egui::vec2(side, side * 9.0 / 16.0)
                }
            }) * percent.min(1.0);
            let frame = egui::Rect::from_center_size(
                egui::pos2(rect.center().x, top + available.y / 2.0),
                size,
            );
            painter.rect_filled(frame, 8.0 * scale, theme.code_background);
            let label = match image.as_deref() {
                Some(src) if src.starts_with("data:") => "Embedded image",
                Some(src) => src,
                None => "No image",
            };
            let galley = painter.layout(
                label.to_string(),
                egui::FontId::monospace(theme.code_size * 0.6 * scale),
                Theme::with_opacity(theme.code_foreground, 0.7),
                frame.width() - 32.0 * scale,
            );
            let pos = frame.center() - galley.rect.size() / 2.0;
            painter.galley(pos, galley, theme.code_foreground);
            if let Some(caption) = content.as_deref().filter(|c| !c.is_empty()) {
                text_block(
                    caption,
                    theme.body_size * 0.7,
                    theme.foreground,
                    frame.bottom() + 24.0 * scale,
                );
            }
        }
        SlideBody::Code { content, code } => {
            let mut top = text_block(title, theme.heading_size, theme.heading_color, margin);
            if let Some(content) = content.as_deref().filter(|c| !c.is_empty()) {
                top = text_block(content, theme.body_size, theme.foreground, top + 24.0 * scale);
            }
            top += 32.0 * scale;
            let galley = painter.layout(
                code.clone().unwrap_or_default(),
                egui::FontId::monospace(theme.code_size * scale),
                theme.code_foreground,
                width - 64.0 * scale,
            );
            let frame = egui::Rect::from_min_size(
                egui::pos2(rect.left() + margin, top),
                galley.rect.size() + egui::vec2(64.0, 64.0) * scale,
            );
            painter.rect_filled(frame, 8.0 * scale, theme.code_background);
            painter.galley(
                frame.min + egui::vec2(32.0, 32.0) * scale,
                galley,
                theme.code_foreground,
            );
        }
        SlideBody::Blank { content } => {
            if let Some(content) = content.as_deref().filter(|c| !c.is_empty()) {
                text_block(content, theme.body_size, theme.foreground, margin);
            }
        }
    }
}

/// Map a pressed egui key onto the keys playback understands.
fn player_key(key: egui::Key) -> Key {
    match key {
        egui::Key::ArrowRight => Key::ArrowRight,
        egui::Key::ArrowLeft => Key::ArrowLeft,
        egui::Key::Space => Key::Space,
        egui::Key::Escape => Key::Escape,
        _ => Key::Other,
    }
}

impl eframe::App for PresenterApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Collect first; viewport commands are sent outside ctx.input()
        let (keys, toggle_theme, close_requested) = ctx.input(|i| {
            let keys: Vec<Key> = i
                .events
                .iter()
                .filter_map(|event| match event {
                    egui::Event::Key {
                        key, pressed: true, ..
                    } => Some(player_key(*key)),
                    _ => None,
                })
                .collect();
            (
                keys,
                i.key_pressed(egui::Key::T),
                i.viewport().close_requested(),
            )
        });

        if toggle_theme {
            self.theme = self.theme.toggled();
        }

        let mut finished = false;
        for key in keys {
            if self.handle(key) {
                finished = true;
                break;
            }
        }
        if close_requested && self.player.is_presenting() {
            self.handle(Key::Escape);
        }
        if finished {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            return;
        }

        let bg = self.theme.background;
        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(bg).inner_margin(0.0))
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                ui.painter().rect_filled(rect, 0.0, bg);
                self.draw(ui, rect);
            });
    }
}

pub fn run(
    data_dir: Option<PathBuf>,
    start_slide: Option<String>,
    windowed: bool,
) -> anyhow::Result<()> {
    let session = open_session(data_dir)?;
    let state = session.state();
    let start = match start_slide.as_deref() {
        Some(raw) => navigation::resolve(Some(raw), state.deck.len()),
        None => state.current_index(),
    };
    let title = format!("Presento \u{00B7} {}", state.deck.name());
    let theme = Theme::from_name(Config::load_or_default().theme());

    let viewport = if windowed {
        egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_title(&title)
    } else {
        egui::ViewportBuilder::default()
            .with_fullscreen(true)
            .with_title(&title)
    };
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| Ok(Box::new(PresenterApp::new(session, start, theme)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}
