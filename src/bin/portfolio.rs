use std::{path::PathBuf, sync::Arc, time::Duration};

use anyhow::Context as _;
use clap::Parser;
use eframe::egui;
use glam::Vec2;
use parking_lot::Mutex;
use particle_portfolio::{
    Canvas, FrameLoop, ParticleField, Rgba, SiteConfig, Visibility,
    clock::{Clock, MonotonicClock},
    code_typing::CodeTyper,
    config::EasterEggConfig,
    contact::{ContactForm, Field, NoticeKind},
    konami::{Key, KonamiDetector},
    loading::{LoadingEvent, LoadingSplash},
    portfolio::Portfolio,
    typing::TypingCycler,
};

const BACKGROUND: egui::Color32 = egui::Color32::from_rgb(0x0f, 0x0f, 0x23);
const ACCENT: egui::Color32 = egui::Color32::from_rgb(0x00, 0xd4, 0xff);

/// Frame loop handle shared by everything that needs to pause, resume or
/// re-seed the background.
type SharedLoop = Arc<Mutex<FrameLoop>>;

#[derive(Parser, Debug)]
#[command(name = "portfolio", about = "Animated portfolio page with a particle network background")]
struct Args {
    /// TOML file overriding the default page settings.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for the particle field, for reproducible runs.
    #[arg(long)]
    seed: Option<u64>,

    /// Number of background particles.
    #[arg(long)]
    particles: Option<usize>,
}

fn vec2(pos: egui::Pos2) -> Vec2 {
    Vec2::new(pos.x, pos.y)
}

fn pos2(v: Vec2) -> egui::Pos2 {
    egui::pos2(v.x, v.y)
}

fn color32(color: Rgba) -> egui::Color32 {
    let alpha = (color.a.clamp(0.0, 1.0) * 255.0).round() as u8;
    egui::Color32::from_rgba_unmultiplied(color.r, color.g, color.b, alpha)
}

/// Paints field frames onto the window background layer.
struct PainterCanvas<'a> {
    painter: &'a egui::Painter,
}

impl Canvas for PainterCanvas<'_> {
    fn clear(&mut self, size: Vec2) {
        let rect = egui::Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(size.x, size.y));
        self.painter.rect_filled(rect, 0.0, BACKGROUND);
    }

    fn line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba) {
        self.painter
            .line_segment([pos2(from), pos2(to)], egui::Stroke::new(width, color32(color)));
    }

    fn circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.painter.circle_filled(pos2(center), radius, color32(color));
    }
}

/// Pauses the background while the window is minimized.
struct VisibilityWatcher {
    frame_loop: SharedLoop,
    last: Visibility,
}

impl VisibilityWatcher {
    fn observe(&mut self, visibility: Visibility) {
        if visibility != self.last {
            self.last = visibility;
            self.frame_loop.lock().set_visibility(visibility);
        }
    }
}

/// Konami code: floods the background with particles and shows a banner.
struct EasterEgg {
    frame_loop: SharedLoop,
    detector: KonamiDetector,
    config: EasterEggConfig,
    banner_until: Option<Duration>,
}

impl EasterEgg {
    fn press(&mut self, key: Key, now: Duration) {
        if self.detector.push(key) {
            self.frame_loop
                .lock()
                .field_mut()
                .reseed(self.config.particle_count);
            self.banner_until = Some(now + Duration::from_millis(self.config.message_ms));
        }
    }

    fn banner(&mut self, now: Duration) -> Option<&str> {
        match self.banner_until {
            Some(until) if now < until => Some(&self.config.message),
            _ => {
                self.banner_until = None;
                None
            }
        }
    }
}

/// Everything that only exists once the loading splash is gone.
struct Page {
    frame_loop: SharedLoop,
    visibility: VisibilityWatcher,
    easter_egg: EasterEgg,
    typing: TypingCycler,
    code: CodeTyper,
    portfolio: Portfolio,
    contact: ContactForm,
}

impl Page {
    fn new(config: &SiteConfig, field: ParticleField, now: Duration) -> Self {
        let mut frame_loop = FrameLoop::new(field);
        frame_loop.start();
        let frame_loop = Arc::new(Mutex::new(frame_loop));

        Self {
            visibility: VisibilityWatcher {
                frame_loop: frame_loop.clone(),
                last: Visibility::Visible,
            },
            easter_egg: EasterEgg {
                frame_loop: frame_loop.clone(),
                detector: KonamiDetector::new(),
                config: config.easter_egg.clone(),
                banner_until: None,
            },
            frame_loop,
            typing: TypingCycler::new(config.typing.clone(), now),
            code: CodeTyper::new(config.code.clone(), now),
            portfolio: Portfolio::new(config.projects.clone()),
            contact: ContactForm::new(config.contact.clone()),
        }
    }
}

struct PortfolioApp {
    config: SiteConfig,
    seed: Option<u64>,
    clock: MonotonicClock,
    rng: rand::rngs::ThreadRng,
    splash: LoadingSplash,
    page: Option<Page>,
}

impl PortfolioApp {
    fn new(_cc: &eframe::CreationContext, config: SiteConfig, seed: Option<u64>) -> Self {
        let clock = MonotonicClock::new();
        let splash = LoadingSplash::new(config.loading.clone(), clock.now());

        Self {
            config,
            seed,
            clock,
            rng: rand::thread_rng(),
            splash,
            page: None,
        }
    }

    fn build_page(&mut self, bounds: Vec2, now: Duration) {
        let field_config = self.config.field.clone();
        let field = match self.seed {
            Some(seed) => ParticleField::seeded(field_config, bounds, seed),
            None => ParticleField::new(field_config, bounds),
        };
        self.page = Some(Page::new(&self.config, field, now));
    }

    fn render_splash(&self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(BACKGROUND))
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.add_space(ui.available_height() * 0.4);
                    ui.heading("Loading");
                    ui.add(
                        egui::ProgressBar::new(self.splash.progress() / 100.0)
                            .desired_width(300.0)
                            .text(format!("{}%", self.splash.percentage())),
                    );
                });
            });
    }
}

fn pressed_keys(input: &egui::InputState) -> Vec<Key> {
    let mut keys = Vec::new();
    for event in &input.events {
        if let egui::Event::Key {
            key, pressed: true, ..
        } = event
        {
            keys.push(match key {
                egui::Key::ArrowUp => Key::Up,
                egui::Key::ArrowDown => Key::Down,
                egui::Key::ArrowLeft => Key::Left,
                egui::Key::ArrowRight => Key::Right,
                egui::Key::A => Key::A,
                egui::Key::B => Key::B,
                egui::Key::Escape => Key::Escape,
                _ => Key::Other,
            });
        }
    }
    keys
}

fn render_hero(ui: &mut egui::Ui, page: &Page) {
    ui.add_space(40.0);
    ui.label(egui::RichText::new("Helber Oliveira").size(36.0).strong());
    ui.label(
        egui::RichText::new(format!("{}|", page.typing.current()))
            .size(22.0)
            .color(ACCENT),
    );
    ui.add_space(20.0);
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_min_width(420.0);
        ui.label(egui::RichText::new(page.code.shown()).monospace());
    });
}

fn render_portfolio(ui: &mut egui::Ui, portfolio: &mut Portfolio) {
    ui.add_space(30.0);
    ui.heading("Portfolio");

    ui.horizontal(|ui| {
        for filter in portfolio.filters() {
            let active = *portfolio.filter() == filter;
            if ui.selectable_label(active, filter.label()).clicked() {
                portfolio.set_filter(filter);
            }
        }
    });

    let mut open = None;
    for project in portfolio.visible() {
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new(project.title.as_str()).strong());
            ui.label(egui::RichText::new(project.category.as_str()).weak());
            if ui.button("Details").clicked() {
                open = Some(project.id.clone());
            }
        });
    }
    if let Some(id) = open {
        portfolio.open(&id);
    }
}

fn render_project_modal(ctx: &egui::Context, portfolio: &mut Portfolio, escape: bool) {
    if escape {
        portfolio.close();
    }
    let Some(project) = portfolio.opened() else {
        return;
    };

    let mut open = true;
    egui::Window::new(project.title.as_str())
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            ui.label(project.description.as_str());
            ui.horizontal_wrapped(|ui| {
                for tech in &project.tech {
                    ui.label(egui::RichText::new(tech.as_str()).color(ACCENT));
                }
            });
            ui.hyperlink_to("Source", &project.github);
            if let Some(demo) = &project.demo {
                ui.hyperlink_to("Demo", demo);
            }
            if let Some(image) = &project.image {
                ui.hyperlink_to("Preview image", image);
            }
        });

    if !open {
        portfolio.close();
    }
}

fn render_contact(ui: &mut egui::Ui, contact: &mut ContactForm, now: Duration) {
    ui.add_space(30.0);
    ui.heading("Contact");

    for field in Field::ALL {
        ui.label(field.label());
        let response = {
            let value = contact.draft.value_mut(field);
            if field == Field::Message {
                ui.text_edit_multiline(value)
            } else {
                ui.text_edit_singleline(value)
            }
        };
        if response.changed() {
            contact.clear_error(field);
        }
        if response.lost_focus() {
            contact.check(field);
        }
        if let Some(err) = contact.error(field) {
            ui.colored_label(egui::Color32::from_rgb(0xff, 0x5f, 0x57), err.to_string());
        }
    }

    ui.horizontal(|ui| {
        let sending = contact.is_sending();
        if ui
            .add_enabled(!sending, egui::Button::new("Send message"))
            .clicked()
        {
            contact.submit(now);
        }
        if sending {
            ui.spinner();
        }
    });
}

fn render_toasts(ctx: &egui::Context, page: &mut Page, now: Duration) {
    let banner = page.easter_egg.banner(now).map(str::to_owned);
    if let Some(message) = banner {
        egui::Area::new("easter_egg")
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.label(egui::RichText::new(message).size(24.0).strong());
                });
            });
    }

    egui::Area::new("notifications")
        .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-20.0, 20.0))
        .show(ctx, |ui| {
            for notice in page.contact.notices() {
                let color = match notice.kind {
                    NoticeKind::Success => egui::Color32::from_rgb(0x00, 0xff, 0x88),
                    NoticeKind::Error => egui::Color32::from_rgb(0xff, 0x5f, 0x57),
                };
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.colored_label(color, notice.text.as_str());
                });
            }
        });
}

impl eframe::App for PortfolioApp {
    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        let now = self.clock.now();
        let (screen, pointer, keys) = ctx.input(|i| {
            (i.screen_rect(), i.pointer.hover_pos(), pressed_keys(i))
        });
        let bounds = Vec2::new(screen.width(), screen.height());

        if self.splash.poll(now, &mut self.rng) == Some(LoadingEvent::Ready) {
            self.build_page(bounds, now);
        }

        let Some(page) = self.page.as_mut() else {
            if self.splash.is_visible() {
                self.render_splash(ctx);
            } else {
                egui::CentralPanel::default()
                    .frame(egui::Frame::none().fill(BACKGROUND))
                    .show(ctx, |_| {});
            }
            ctx.request_repaint();
            return;
        };

        let visibility = if frame.info().window_info.minimized {
            Visibility::Hidden
        } else {
            Visibility::Visible
        };
        page.visibility.observe(visibility);

        for &key in &keys {
            page.easter_egg.press(key, now);
        }

        let next = {
            let mut frame_loop = page.frame_loop.lock();
            let field = frame_loop.field_mut();
            field.resize(bounds);
            if let Some(pointer) = pointer {
                field.set_pointer(vec2(pointer));
            }
            frame_loop.next_frame()
        };
        if let Some(next) = next {
            let painter = ctx.layer_painter(egui::LayerId::background());
            next.paint(&mut PainterCanvas { painter: &painter });
        }

        page.typing.poll(now);
        page.code.poll(now);
        page.contact.poll(now);

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    render_hero(ui, page);
                    render_portfolio(ui, &mut page.portfolio);
                    render_contact(ui, &mut page.contact, now);
                    ui.allocate_space(egui::vec2(ui.available_width(), 40.0));
                });
            });

        render_project_modal(ctx, &mut page.portfolio, keys.contains(&Key::Escape));
        render_toasts(ctx, page, now);

        ctx.request_repaint();
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SiteConfig::load(path)
            .with_context(|| format!("loading site config from {}", path.display()))?,
        None => SiteConfig::default(),
    };
    if let Some(particles) = args.particles {
        config.field.particle_count = particles;
    }

    tracing::info!(
        particles = config.field.particle_count,
        seed = ?args.seed,
        "launching portfolio"
    );

    let seed = args.seed;
    eframe::run_native(
        "Portfolio",
        eframe::NativeOptions {
            initial_window_size: Some(egui::vec2(1280.0, 800.0)),
            ..Default::default()
        },
        Box::new(move |cc| Box::new(PortfolioApp::new(cc, config, seed))),
    )
    .map_err(|err| anyhow::anyhow!("window closed with an error: {err}"))
}
