use cube_engine::{
    CubeConfig, CubeSession, FlipConfig, InputEvent, RenderBuffer, Scramble, ScrambleError,
};

/// Wires a `CubeSession` to the flat buffers the browser renderer reads.
///
/// The bridge keeps one `thread_local!` CubeRunner and exports free functions
/// via `#[wasm_bindgen]`, because wasm-bindgen cannot export the session
/// directly.
pub struct CubeRunner {
    session: CubeSession,
    render_buffer: RenderBuffer,
    /// Event codes emitted during the last frame.
    event_buffer: Vec<f32>,
    /// Column-major view-projection matrix.
    camera_buffer: [f32; 16],
}

impl CubeRunner {
    pub fn new(config: CubeConfig) -> Self {
        let mut runner = Self {
            session: CubeSession::new(config),
            render_buffer: RenderBuffer::new(),
            event_buffer: Vec::with_capacity(8),
            camera_buffer: [0.0; 16],
        };
        runner.rebuild_buffers();
        runner
    }

    pub fn session(&self) -> &CubeSession {
        &self.session
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.session.push_input(event);
    }

    /// Run one display frame at `now` (ms) and refresh every buffer.
    pub fn frame(&mut self, now: f64) {
        self.session.frame(now);

        self.event_buffer.clear();
        for event in self.session.drain_events() {
            self.event_buffer.push(event.code());
        }

        self.rebuild_buffers();
    }

    fn rebuild_buffers(&mut self) {
        self.render_buffer.rebuild(self.session.cube());

        let matrix = self.session.camera().uniform().view_projection;
        for (slot, value) in self.camera_buffer.iter_mut().zip(matrix.iter().flatten()) {
            *slot = *value;
        }
    }

    // ---- Commands ----

    pub fn resize(&mut self, width: f32, height: f32) {
        self.session.set_viewport(width, height);
        self.rebuild_buffers();
    }

    /// Scramble with `notation`, or randomly when it is blank.
    pub fn scramble(&mut self, notation: &str) -> Result<String, ScrambleError> {
        let request = if notation.trim().is_empty() {
            Scramble::Random
        } else {
            Scramble::Notation(notation)
        };
        self.session.scramble(request)
    }

    pub fn reset(&mut self) {
        self.session.reset();
        self.rebuild_buffers();
    }

    pub fn enable(&mut self) {
        self.session.enable();
    }

    pub fn disable(&mut self) {
        self.session.disable();
    }

    pub fn set_flip_config(&mut self, value: u8) {
        match FlipConfig::try_from(value) {
            Ok(config) => self.session.set_flip_config(config),
            Err(err) => log::warn!("{}", err),
        }
    }

    pub fn set_scramble_length(&mut self, length: usize) {
        self.session.set_scramble_length(length);
    }

    pub fn set_float(&mut self, on: bool) {
        if on {
            self.session.float();
        } else {
            self.session.stop_float();
        }
    }

    pub fn elevate(&mut self, complete: bool) {
        self.session.elevate(complete);
    }

    pub fn zoom(&mut self, play: bool, time: f32) {
        self.session.zoom(play, time);
    }

    pub fn show_cube(&mut self, show: bool) {
        self.session.show_cube(show);
    }

    pub fn is_solved(&self) -> bool {
        self.session.is_solved()
    }

    pub fn is_animating(&self) -> bool {
        self.session.is_animating()
    }

    // ---- Pointer accessors for SharedArrayBuffer reads ----

    pub fn pieces_ptr(&self) -> *const f32 {
        self.render_buffer.pieces_ptr()
    }

    pub fn piece_count(&self) -> u32 {
        self.render_buffer.piece_count()
    }

    pub fn tiles_ptr(&self) -> *const f32 {
        self.render_buffer.tiles_ptr()
    }

    pub fn tile_count(&self) -> u32 {
        self.render_buffer.tile_count()
    }

    pub fn events_ptr(&self) -> *const f32 {
        self.event_buffer.as_ptr()
    }

    pub fn events_len(&self) -> u32 {
        self.event_buffer.len() as u32
    }

    pub fn camera_ptr(&self) -> *const f32 {
        self.camera_buffer.as_ptr()
    }

    pub fn events(&self) -> &[f32] {
        &self.event_buffer
    }
}
