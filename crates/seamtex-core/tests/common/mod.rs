use std::cell::{Cell, RefCell};
use std::io::Cursor;
use std::rc::Rc;

use image::{ImageFormat, Rgba, RgbaImage};

use seamtex_core::config::SessionConfig;
use seamtex_core::error::{Result, SeamtexError};
use seamtex_core::processor::{TextureProcessor, UvOrientation};
use seamtex_core::resource::FileHandle;
use seamtex_core::Session;

/// Every external call the fake received, in order.
pub type CallLog = Rc<RefCell<Vec<String>>>;

/// Deterministic stand-in for the processing module.
///
/// - meshes whose bytes start with `bad` fail to parse; others have 2 faces
/// - meshes whose bytes start with `short` parse but report one position
///   float too few
/// - while `reject_meshes` is set every mesh load fails and drops the
///   current mesh
/// - `smooth` writes the inverted input to the output buffer
/// - `compress` writes a DXT1 DDS header plus the input bytes to the
///   compressed buffer, and a copy of the input as the decoded preview
pub struct FakeProcessor {
    pub calls: CallLog,
    pub fail_ops: bool,
    pub short_output: bool,
    pub with_preview: bool,
    pub reject_meshes: Rc<Cell<bool>>,
    faces: usize,
    short_positions: bool,
    width: u32,
    height: u32,
    image: Vec<u8>,
    output: Vec<u8>,
    compressed: Vec<u8>,
}

impl FakeProcessor {
    pub fn new() -> (Self, CallLog) {
        let calls: CallLog = Rc::new(RefCell::new(Vec::new()));
        let fake = Self {
            calls: Rc::clone(&calls),
            fail_ops: false,
            short_output: false,
            with_preview: true,
            reject_meshes: Rc::new(Cell::new(false)),
            faces: 0,
            short_positions: false,
            width: 0,
            height: 0,
            image: Vec::new(),
            output: Vec::new(),
            compressed: Vec::new(),
        };
        (fake, calls)
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.borrow_mut().push(call.into());
    }

    fn fail_if_requested(&self, op: &str) -> Result<()> {
        if self.fail_ops {
            return Err(SeamtexError::Processor(format!("{op} exploded")));
        }
        Ok(())
    }

    fn write_smoothed(&mut self) {
        self.output = self.image.iter().map(|v| 255 - v).collect();
        if self.short_output {
            self.output.truncate(self.output.len() / 2);
        }
    }

    fn write_compressed(&mut self) {
        self.compressed = dds_header(self.width, self.height, b"DXT1");
        self.compressed.extend_from_slice(&self.image);
        if self.with_preview {
            self.output = self.image.clone();
        } else {
            self.output.clear();
        }
    }
}

impl TextureProcessor for FakeProcessor {
    fn name(&self) -> &str {
        "fake"
    }

    fn load_mesh(&mut self, name: &str, bytes: &[u8]) -> Result<()> {
        self.record(format!("load_mesh:{name}"));
        if self.reject_meshes.get() {
            self.faces = 0;
            return Err(SeamtexError::Processor("mesh loading disabled".into()));
        }
        if bytes.starts_with(b"bad") {
            return Err(SeamtexError::Processor("malformed mesh".into()));
        }
        self.faces = 2;
        self.short_positions = bytes.starts_with(b"short");
        Ok(())
    }

    fn face_count(&self) -> usize {
        self.faces
    }

    fn positions(&self) -> Result<Vec<f32>> {
        let mut positions: Vec<f32> = (0..self.faces * 9).map(|i| i as f32).collect();
        if self.short_positions {
            positions.pop();
        }
        Ok(positions)
    }

    fn uvs(&self, _orientation: UvOrientation) -> Result<Vec<f32>> {
        Ok(vec![0.5; self.faces * 6])
    }

    fn allocate_image_buffers(&mut self, width: u32, height: u32) -> Result<()> {
        self.record(format!("allocate:{width}x{height}"));
        self.width = width;
        self.height = height;
        self.image = vec![0; width as usize * height as usize * 4];
        self.output.clear();
        self.compressed.clear();
        Ok(())
    }

    fn image_buf_mut(&mut self) -> &mut [u8] {
        &mut self.image
    }

    fn output_buf(&self) -> &[u8] {
        &self.output
    }

    fn compressed_buf(&self) -> &[u8] {
        &self.compressed
    }

    fn smooth(&mut self, alpha: f32) -> Result<()> {
        self.record(format!("smooth:{alpha}"));
        self.fail_if_requested("smooth")?;
        self.write_smoothed();
        Ok(())
    }

    fn compress(&mut self) -> Result<()> {
        self.record("compress");
        self.fail_if_requested("compress")?;
        self.write_compressed();
        Ok(())
    }

    fn compress_and_smooth(&mut self, alpha: f32) -> Result<()> {
        self.record(format!("compress_and_smooth:{alpha}"));
        self.fail_if_requested("compress_and_smooth")?;
        self.write_compressed();
        Ok(())
    }
}

/// A 128-byte DDS header (magic + 124-byte header) with the given FourCC.
pub fn dds_header(width: u32, height: u32, fourcc: &[u8; 4]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(128);
    buf.extend_from_slice(b"DDS ");
    buf.extend_from_slice(&124u32.to_le_bytes());
    buf.extend_from_slice(&0x1007u32.to_le_bytes());
    buf.extend_from_slice(&height.to_le_bytes());
    buf.extend_from_slice(&width.to_le_bytes());
    buf.resize(84, 0);
    buf.extend_from_slice(fourcc);
    buf.resize(128, 0);
    buf
}

/// PNG bytes of a `width` x `height` horizontal gradient.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, 128, 255])
    });
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png).expect("encode png");
    out.into_inner()
}

pub fn texture_file(name: &str, width: u32, height: u32) -> FileHandle {
    FileHandle::from_bytes(name, Some("image/png".into()), png_bytes(width, height))
}

pub fn mesh_file(name: &str) -> FileHandle {
    FileHandle::from_bytes(name, None, b"v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n".to_vec())
}

pub fn broken_mesh_file(name: &str) -> FileHandle {
    FileHandle::from_bytes(name, None, b"short mesh".to_vec())
}

/// The `load_mesh:` calls the fake received, in order.
pub fn mesh_loads(calls: &CallLog) -> Vec<String> {
    calls
        .borrow()
        .iter()
        .filter(|c| c.starts_with("load_mesh:"))
        .cloned()
        .collect()
}

pub fn new_session() -> (Session, CallLog) {
    let (fake, calls) = FakeProcessor::new();
    (Session::new(SessionConfig::default(), Box::new(fake)), calls)
}

pub fn session_with(fake: FakeProcessor) -> Session {
    Session::new(SessionConfig::default(), Box::new(fake))
}

/// Session with `mesh.obj` and a 256x256 `tex.png` loaded.
pub fn loaded_session() -> (Session, CallLog) {
    let (mut session, calls) = new_session();
    session.load_mesh(&mesh_file("mesh.obj")).expect("load mesh");
    assert!(session.load_texture(&texture_file("tex.png", 256, 256)).expect("load texture"));
    (session, calls)
}

/// Count of external image operations recorded.
pub fn image_op_count(calls: &CallLog) -> usize {
    calls
        .borrow()
        .iter()
        .filter(|c| c.starts_with("smooth") || c.starts_with("compress") || c.starts_with("allocate"))
        .count()
}
