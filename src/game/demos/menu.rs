//! A keyboard and mouse driven menu floating over a scrolling 3D landscape.

use crate::engine::audio::Sample;
use crate::engine::graphics::draw::{BLACK, WHITE};
use crate::engine::graphics::{DrawList, Point3, TextureId};
use crate::engine::input::Control;
use crate::engine::render2d::{BitmapFont, Menu};
use crate::engine::{INTERNAL_RES_X, INTERNAL_RES_Y};
use crate::game::assets::Assets;
use crate::game::demos::common::{draw_fps, draw_paused, draw_title, draw_top_right, Transparency};
use crate::game::demos::{Demo, FrameContext};

const CLEAR_COLOR: [f32; 4] = [0.4, 0.0, 0.0, 1.0];
const MENU_TITLE: &str = "  MAIN MENU  ";

const DEFAULT_ROLL_SPEED: f32 = 0.001;
const ROLL_SPEED_STEP: f32 = 0.0001;
const MAX_ROLL_SPEED: f32 = 0.1;
const GROUND_SPEED_FACTOR: f32 = 10.0;

const OPTION_TITLE: usize = 0;
const OPTION_SOUND: usize = 1;
const OPTION_QUIT: usize = 2;

const MENU_KEYS: [Control; 3] = [Control::Enter, Control::Up, Control::Down];

pub struct MenuDemo {
    clouds: Option<TextureId>,
    ground: Option<TextureId>,
    menu: Menu,
    small_font: BitmapFont,
    large_font: BitmapFont,
    roll_clouds: f32,
    roll_ground: f32,
    roll_speed: f32,
    transparency: Transparency,
    has_title: bool,
    /// Menu keys must all be released before another one is acted on.
    keys_released: bool,
    mouse_released: bool,
}

impl MenuDemo {
    pub fn new(assets: &Assets) -> Self {
        let mut menu = Menu::new(assets.menu_panel.id, assets.menu_font.clone());
        menu.set_title(MENU_TITLE);
        menu.add_option("Disable Title");
        menu.add_option("Disable Sound");
        menu.add_option("Quit         ");
        Self {
            clouds: assets.clouds.id,
            ground: assets.ground.id,
            menu,
            small_font: assets.small_font.clone(),
            large_font: assets.large_font.clone(),
            roll_clouds: 0.0,
            roll_ground: 0.0,
            roll_speed: DEFAULT_ROLL_SPEED,
            transparency: Transparency::default(),
            has_title: true,
            keys_released: true,
            mouse_released: false,
        }
    }

    fn place_menu(&mut self) {
        let x = ((INTERNAL_RES_X - self.menu.width()) / 2.0).trunc();
        let y = ((INTERNAL_RES_Y - self.menu.height()) / 2.0).trunc();
        self.menu.set_dest(x, y);
    }

    fn draw_landscape(&self, draw: &mut DrawList) {
        // Texture coordinates below have v pointing up the image.
        let uv = |p: Point3, u: f32, v: f32| p.uv(u, 1.0 - v);

        draw.bind_texture(self.clouds);
        draw.set_normal(glam::Vec3::Z);
        for (mirrored, divisor) in [(false, 0.5), (true, 1.0)] {
            let roll = self.roll_clouds / divisor;
            let (near_u, far_u) = if mirrored { (0.0, 1.0) } else { (1.0, 0.0) };
            draw.quad([
                uv(Point3::new(28.0, 6.0, 0.0), near_u, 1.0 + roll),
                uv(Point3::new(-28.0, 6.0, 0.0), far_u, 1.0 + roll),
                uv(Point3::new(-28.0, -3.0, -50.0), far_u, roll),
                uv(Point3::new(28.0, -3.0, -50.0), near_u, roll),
            ]);
        }

        draw.bind_texture(self.ground);
        let roll = self.roll_ground;
        draw.quad([
            uv(Point3::new(28.0, -3.0, -50.0), 7.0, 4.0 - roll),
            uv(Point3::new(-28.0, -3.0, -50.0), 0.0, 4.0 - roll),
            uv(Point3::new(-28.0, -3.0, 0.0), 0.0, -roll),
            uv(Point3::new(28.0, -3.0, 0.0), 7.0, -roll),
        ]);
        draw.bind_texture(None);
    }

    fn roll(&mut self) {
        self.roll_clouds -= self.roll_speed;
        if self.roll_clouds < -1.0 + self.roll_speed || self.roll_clouds >= 1.0 {
            self.roll_clouds = 0.0;
        }
        self.roll_ground -= self.roll_speed * GROUND_SPEED_FACTOR;
        if self.roll_ground < -4.0 + self.roll_speed || self.roll_ground >= 4.0 {
            self.roll_ground = 0.0;
        }
    }

    /// Returns the option chosen from the keyboard or controller, if any.
    fn handle(&mut self, control: Control, ctx: &mut FrameContext) -> Option<usize> {
        if self.transparency.handle(control) {
            return None;
        }
        match control {
            Control::Up | Control::Down | Control::Enter if !self.keys_released => None,
            Control::Up => {
                self.keys_released = false;
                self.menu.highlight_prev();
                ctx.audio.play_sample(Sample::Option);
                None
            }
            Control::Down => {
                self.keys_released = false;
                self.menu.highlight_next();
                ctx.audio.play_sample(Sample::Option);
                None
            }
            Control::Enter => {
                self.keys_released = false;
                ctx.audio.play_sample(Sample::Select);
                Some(self.menu.highlight())
            }
            Control::Right if self.roll_speed < MAX_ROLL_SPEED => {
                self.roll_speed += ROLL_SPEED_STEP;
                None
            }
            Control::Left if self.roll_speed > -MAX_ROLL_SPEED => {
                self.roll_speed -= ROLL_SPEED_STEP;
                None
            }
            Control::Home => {
                self.transparency.reset();
                self.roll_speed = DEFAULT_ROLL_SPEED;
                None
            }
            _ => None,
        }
    }

    /// Hover highlights, a fresh left click on the highlighted option selects it.
    fn handle_mouse(&mut self, ctx: &mut FrameContext) -> Option<usize> {
        let (x, y) = ctx.input.mouse();
        if let Some(index) = self.menu.option_at(x, y) {
            if index != self.menu.highlight() {
                self.menu.set_highlight(index);
                ctx.audio.play_sample(Sample::Option);
            }
        }

        if !ctx.input.is_left_pressed() {
            self.mouse_released = true;
            return None;
        }
        if self.mouse_released && self.menu.highlight_rect().contains(x, y) {
            self.mouse_released = false;
            ctx.audio.play_sample(Sample::Select);
            return Some(self.menu.highlight());
        }
        None
    }

    fn select(&mut self, option: usize, ctx: &mut FrameContext) {
        match option {
            OPTION_TITLE => {
                self.has_title = !self.has_title;
                if self.has_title {
                    self.menu.set_title(MENU_TITLE);
                    self.menu.set_option(OPTION_TITLE, "Disable Title");
                } else {
                    self.menu.set_title("");
                    self.menu.set_option(OPTION_TITLE, "Enable Title ");
                }
            }
            OPTION_SOUND => {
                if ctx.audio.is_paused() {
                    ctx.audio.set_paused(false);
                    self.menu.set_option(OPTION_SOUND, "Disable Sound");
                } else {
                    ctx.audio.set_paused(true);
                    self.menu.set_option(OPTION_SOUND, "Enable Sound ");
                }
            }
            OPTION_QUIT => ctx.request_quit(),
            _ => {}
        }
    }

    fn draw_overlays(&mut self, draw: &mut DrawList, ctx: &FrameContext) {
        let alpha = self.transparency.alpha();
        draw_fps(draw, &self.small_font, ctx.fps);

        let (x, y) = ctx.input.mouse();
        draw_top_right(draw, &self.small_font, &format!("({},{})", x as i32, y as i32));

        self.large_font.set_color(WHITE);
        let cursor_y = y.trunc() - self.large_font.text_height() + 1.0;
        self.large_font.draw(draw, "#", x.trunc(), cursor_y);

        draw_title(draw, &mut self.large_font, "MENUS", alpha);
    }
}

impl Demo for MenuDemo {
    fn frame(&mut self, ctx: &mut FrameContext, draw: &mut DrawList) {
        if ctx.paused {
            draw.clear(BLACK);
            draw.begin_2d();
            draw_paused(draw, &mut self.small_font);
            return;
        }

        draw.clear(CLEAR_COLOR);
        self.draw_landscape(draw);
        draw.begin_2d();
        self.place_menu();
        self.menu.set_alpha(self.transparency.alpha());
        self.menu.render(draw);
        self.roll();

        if ctx.input.are_up(&MENU_KEYS) {
            self.keys_released = true;
        }
        let from_keys = match ctx.control() {
            Some(control) => self.handle(control, ctx),
            None => None,
        };
        let from_mouse = self.handle_mouse(ctx);
        if let Some(option) = from_keys.or(from_mouse) {
            self.select(option, ctx);
        }

        self.draw_overlays(draw, ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::audio::testing::RecordingPlayer;
    use crate::engine::graphics::RenderScaling;
    use crate::engine::input::InputHandler;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use winit::keyboard::KeyCode;

    fn run(demo: &mut MenuDemo, input: &InputHandler, audio: &mut RecordingPlayer, frames: usize) -> bool {
        let mut rng = StdRng::seed_from_u64(0);
        let mut draw = DrawList::new();
        let mut ctx = FrameContext::new(input, audio, &mut rng, 16.0);
        for _ in 0..frames {
            demo.frame(&mut ctx, &mut draw);
        }
        ctx.quit_requested()
    }

    fn holding(key: KeyCode) -> InputHandler {
        let mut input = InputHandler::new();
        input.handle_keyboard_input_event(key, true, false);
        input
    }

    fn pointing_at(demo: &mut MenuDemo, option: usize, pressed: bool) -> InputHandler {
        demo.place_menu();
        let (x, y) = demo.menu.option_rect(option).center();
        let mut input = InputHandler::new();
        let scaling = RenderScaling::new(640, 480, true);
        input.handle_cursor_moved(x as f64, (INTERNAL_RES_Y - y - 1.0) as f64, &scaling);
        input.handle_left_button(pressed);
        input
    }

    #[test]
    fn held_key_moves_highlight_once() {
        let mut demo = MenuDemo::new(&Assets::untextured());
        let mut audio = RecordingPlayer::default();
        run(&mut demo, &holding(KeyCode::ArrowDown), &mut audio, 5);
        assert_eq!(demo.menu.highlight(), 1);
        assert_eq!(audio.played, vec![(Sample::Option, 255)]);

        run(&mut demo, &InputHandler::new(), &mut audio, 1);
        run(&mut demo, &holding(KeyCode::ArrowUp), &mut audio, 1);
        assert_eq!(demo.menu.highlight(), 0);
    }

    #[test]
    fn enter_toggles_the_title() {
        let mut demo = MenuDemo::new(&Assets::untextured());
        let mut audio = RecordingPlayer::default();
        run(&mut demo, &holding(KeyCode::Enter), &mut audio, 3);
        assert_eq!(demo.menu.title(), "");
        assert_eq!(demo.menu.option(0), Some("Enable Title "));
        assert_eq!(audio.played, vec![(Sample::Select, 255)]);

        run(&mut demo, &InputHandler::new(), &mut audio, 1);
        run(&mut demo, &holding(KeyCode::Enter), &mut audio, 1);
        assert_eq!(demo.menu.title(), MENU_TITLE);
    }

    #[test]
    fn sound_option_pauses_and_resumes_audio() {
        let mut demo = MenuDemo::new(&Assets::untextured());
        let mut audio = RecordingPlayer::default();
        demo.menu.set_highlight(OPTION_SOUND);
        run(&mut demo, &holding(KeyCode::Enter), &mut audio, 1);
        assert!(audio.paused);
        assert_eq!(demo.menu.option(1), Some("Enable Sound "));

        run(&mut demo, &InputHandler::new(), &mut audio, 1);
        run(&mut demo, &holding(KeyCode::Enter), &mut audio, 1);
        assert!(!audio.paused);
        assert_eq!(demo.menu.option(1), Some("Disable Sound"));
    }

    #[test]
    fn quit_option_requests_quit() {
        let mut demo = MenuDemo::new(&Assets::untextured());
        let mut audio = RecordingPlayer::default();
        demo.menu.set_highlight(OPTION_QUIT);
        assert!(run(&mut demo, &holding(KeyCode::Enter), &mut audio, 1));
    }

    #[test]
    fn mouse_hover_highlights_and_click_selects() {
        let mut demo = MenuDemo::new(&Assets::untextured());
        let mut audio = RecordingPlayer::default();
        let hover = pointing_at(&mut demo, OPTION_SOUND, false);
        run(&mut demo, &hover, &mut audio, 2);
        assert_eq!(demo.menu.highlight(), OPTION_SOUND);
        assert_eq!(audio.played, vec![(Sample::Option, 255)]);

        let click = pointing_at(&mut demo, OPTION_SOUND, true);
        run(&mut demo, &click, &mut audio, 3);
        assert!(audio.paused);
        assert_eq!(audio.played.last(), Some(&(Sample::Select, 255)));
    }

    #[test]
    fn landscape_rolls_and_wraps() {
        let mut demo = MenuDemo::new(&Assets::untextured());
        demo.roll_speed = 0.1;
        demo.roll();
        assert!((demo.roll_clouds + 0.1).abs() < 1e-6);
        assert!((demo.roll_ground + 1.0).abs() < 1e-6);
        for _ in 0..3 {
            demo.roll();
        }
        assert_eq!(demo.roll_ground, 0.0);
    }

    #[test]
    fn paused_menu_shows_only_the_paused_text() {
        let mut demo = MenuDemo::new(&Assets::untextured());
        let mut audio = RecordingPlayer::default();
        let input = holding(KeyCode::ArrowDown);
        let mut rng = StdRng::seed_from_u64(0);
        let mut draw = DrawList::new();
        let mut ctx = FrameContext::new(&input, &mut audio, &mut rng, 16.0);
        ctx.paused = true;
        demo.frame(&mut ctx, &mut draw);
        assert_eq!(demo.menu.highlight(), 0);
        assert_eq!(draw.clear_color(), BLACK);
        // Only the six glyphs of "PAUSED", no landscape or menu.
        assert_eq!(draw.vertices().len(), 36);
    }
}
