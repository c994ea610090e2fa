/// Interactive terminal viewer for the meshdraw debug renderers
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use meshdraw_core::{
    draw_texcoords, draw_wireframe_with_policy, Camera, Canvas, DrawConfig, DrawError, DrawStats,
    Mesh, ModelPose, ProjectionMode,
};
use nalgebra::Vector3;
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};

pub mod renderer;

pub use renderer::TerminalCanvas;

/// What the viewer draws each frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ViewMode {
    /// Backface-culled wireframe of the rotating mesh
    Wireframe,
    /// UV layout of the mesh
    Texcoords,
}

impl ViewMode {
    fn toggled(self) -> Self {
        match self {
            ViewMode::Wireframe => ViewMode::Texcoords,
            ViewMode::Texcoords => ViewMode::Wireframe,
        }
    }
}

/// Main application struct for the terminal viewer
pub struct TerminalApp {
    mesh: Mesh,
    config: DrawConfig,
    mode: ViewMode,
    pose: ModelPose,
    camera: Camera,
    surface: TerminalCanvas,
    stats: DrawStats,
    notice: Option<&'static str>,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(mesh: Mesh, config: DrawConfig, mode: ViewMode) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(Self::with_size(mesh, config, mode, width, height))
    }

    /// Viewer with a fixed `columns` x `rows` surface; the top row is kept for the status line
    pub fn with_size(
        mesh: Mesh,
        config: DrawConfig,
        mode: ViewMode,
        columns: u16,
        rows: u16,
    ) -> Self {
        let rows = rows.saturating_sub(1).max(1);
        let surface = TerminalCanvas::new(columns, rows, config.background);
        let (w, h) = (columns as u32, rows as u32 * 2);
        let mut app = Self {
            mesh,
            config,
            mode: ViewMode::Wireframe,
            pose: ModelPose::new(Vector3::new(0.3, 0.3, 0.0)),
            camera: Camera::new(w, h),
            surface,
            stats: DrawStats::default(),
            notice: None,
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        };
        app.set_mode(mode);
        app
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    /// Switch views; the texcoord view is refused for meshes without UVs
    pub fn set_mode(&mut self, mode: ViewMode) {
        if mode == ViewMode::Texcoords && !self.mesh.has_texcoords() {
            log::warn!("mesh has no texture coordinates, staying in wireframe view");
            self.notice = Some("no texture coordinates");
            return;
        }
        self.notice = None;
        self.mode = mode;
    }

    pub fn projection_mode(&self) -> ProjectionMode {
        self.camera.mode
    }

    pub fn set_projection_mode(&mut self, mode: ProjectionMode) {
        self.camera.mode = mode;
    }

    /// Status-line message, if the last request couldn't be honoured
    pub fn notice(&self) -> Option<&str> {
        self.notice
    }

    pub fn surface(&self) -> &TerminalCanvas {
        &self.surface
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_millis(1000 / 30); // 30 FPS target

        while self.running {
            let frame_start = Instant::now();

            if event::poll(Duration::from_millis(0))? {
                if let Event::Key(KeyEvent { code, .. }) = event::read()? {
                    self.handle_key(code);
                }
            }

            self.update();

            if let Err(e) = self.render_frame() {
                // A broken mesh won't fix itself between frames
                log::error!("draw failed: {}", e);
                return Err(io::Error::new(io::ErrorKind::InvalidData, e));
            }
            self.present()?;

            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    pub fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.running = false,
            KeyCode::Char('t') => self.set_mode(self.mode.toggled()),
            KeyCode::Char('o') => self.set_projection_mode(match self.camera.mode {
                ProjectionMode::Perspective => ProjectionMode::Orthographic,
                ProjectionMode::Orthographic => ProjectionMode::Perspective,
            }),
            KeyCode::Char('w') | KeyCode::Up => self.pose.rotate(0.1, 0.0, 0.0),
            KeyCode::Char('s') | KeyCode::Down => self.pose.rotate(-0.1, 0.0, 0.0),
            KeyCode::Char('a') | KeyCode::Left => self.pose.rotate(0.0, -0.1, 0.0),
            KeyCode::Char('d') | KeyCode::Right => self.pose.rotate(0.0, 0.1, 0.0),
            KeyCode::Char('e') => self.pose.rotate(0.0, 0.0, 0.1),
            KeyCode::Char('r') => self.pose.rotate(0.0, 0.0, -0.1),
            _ => {}
        }
    }

    fn update(&mut self) {
        // Continuous slow rotation for demo effect
        if self.mode == ViewMode::Wireframe {
            self.pose.rotate(0.01, 0.015, 0.0);
        }
    }

    /// Draw the current view into the surface's canvas
    pub fn render_frame(&mut self) -> Result<(), DrawError> {
        self.surface.clear();
        match self.mode {
            ViewMode::Wireframe => {
                let canvas = self.surface.canvas_mut();
                let (w, h) = (canvas.width(), canvas.height());
                let transforms = self.camera.transforms(&self.pose.matrix(), w, h);
                self.stats = draw_wireframe_with_policy(
                    canvas,
                    &self.mesh,
                    &transforms,
                    self.config.wireframe_colour,
                    self.config.degenerate_policy,
                )?;
            }
            ViewMode::Texcoords => {
                let canvas = self.surface.take_canvas();
                let canvas = draw_texcoords(&self.mesh, Some(canvas), &self.config)?;
                self.surface.set_canvas(canvas);
                self.stats = DrawStats {
                    drawn: self.mesh.triangle_count(),
                    ..DrawStats::default()
                };
            }
        }
        Ok(())
    }

    fn present(&mut self) -> io::Result<()> {
        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 1))?;
        self.surface.draw(&mut stdout)?;

        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            terminal::Clear(terminal::ClearType::CurrentLine),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "meshdraw | {:?} {:?} | FPS: {:.1} | drawn {} culled {}{} | WASD/Arrows=Rotate E/R=Roll T=Toggle view O=Ortho Q=Quit",
                self.mode,
                self.camera.mode,
                self.fps,
                self.stats.drawn,
                self.stats.culled,
                self.notice.map(|n| format!(" | {}", n)).unwrap_or_default()
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meshdraw_core::Rgba;

    fn app(mode: ViewMode) -> TerminalApp {
        TerminalApp::with_size(Mesh::cube(2.0), DrawConfig::default(), mode, 80, 25)
    }

    #[test]
    fn test_status_row_is_reserved() {
        let app = app(ViewMode::Wireframe);
        assert_eq!(app.surface().size(), (80, 24));
    }

    #[test]
    fn test_wireframe_frame_draws_visible_faces() {
        let mut app = app(ViewMode::Wireframe);
        app.render_frame().unwrap();
        assert!(app.stats.drawn > 0);
        assert_eq!(app.stats.drawn + app.stats.culled, 12);
        assert!(app.surface().canvas().count_pixels(Rgba::GREEN) > 0);
    }

    #[test]
    fn test_texcoord_frame_uses_texcoord_colour() {
        let mut app = app(ViewMode::Texcoords);
        app.render_frame().unwrap();
        assert!(app.surface().canvas().count_pixels(Rgba::BLUE) > 0);
        assert_eq!(app.surface().canvas().count_pixels(Rgba::GREEN), 0);
    }

    #[test]
    fn test_keys() {
        let mut app = app(ViewMode::Wireframe);
        app.handle_key(KeyCode::Char('t'));
        assert_eq!(app.mode(), ViewMode::Texcoords);
        let before = app.pose.rotation;
        app.handle_key(KeyCode::Char('d'));
        assert!((app.pose.rotation.y - before.y - 0.1).abs() < 1e-6);
        app.handle_key(KeyCode::Char('o'));
        assert_eq!(app.projection_mode(), ProjectionMode::Orthographic);
        app.handle_key(KeyCode::Char('q'));
        assert!(!app.running);
    }

    #[test]
    fn test_orthographic_frame_draws() {
        let mut app = app(ViewMode::Wireframe);
        app.set_projection_mode(ProjectionMode::Orthographic);
        app.render_frame().unwrap();
        assert!(app.stats.drawn > 0);
        assert!(app.surface().canvas().count_pixels(Rgba::GREEN) > 0);
    }

    #[test]
    fn test_texcoord_frames_keep_surface_size() {
        let mut app = app(ViewMode::Texcoords);
        app.render_frame().unwrap();
        app.render_frame().unwrap();
        assert_eq!(app.surface().size(), (80, 24));
        assert!(app.surface().canvas().count_pixels(Rgba::BLUE) > 0);
    }

    #[test]
    fn test_broken_mesh_is_an_error() {
        let mut mesh = Mesh::cube(1.0);
        mesh.add_triangle([0, 1, 99]);
        let mut app = TerminalApp::with_size(mesh, DrawConfig::default(), ViewMode::Wireframe, 20, 10);
        assert!(matches!(
            app.render_frame(),
            Err(DrawError::IndexOutOfRange { index: 99, .. })
        ));
    }

    fn untextured_triangle() -> Mesh {
        let mesh = meshdraw_core::obj::parse_obj("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n").unwrap();
        assert!(mesh.validate().is_ok());
        mesh
    }

    #[test]
    fn test_texcoord_toggle_without_uvs_stays_in_wireframe() {
        let mut app =
            TerminalApp::with_size(untextured_triangle(), DrawConfig::default(), ViewMode::Wireframe, 20, 10);
        app.render_frame().unwrap();
        app.handle_key(KeyCode::Char('t'));
        assert_eq!(app.mode(), ViewMode::Wireframe);
        assert!(app.notice().is_some());
        assert!(app.render_frame().is_ok());
    }

    #[test]
    fn test_texcoord_start_mode_without_uvs_falls_back() {
        let mut app =
            TerminalApp::with_size(untextured_triangle(), DrawConfig::default(), ViewMode::Texcoords, 20, 10);
        assert_eq!(app.mode(), ViewMode::Wireframe);
        assert!(app.render_frame().is_ok());
    }
}
