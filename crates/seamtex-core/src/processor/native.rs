//! Processing module loaded from a shared library at runtime.
//!
//! The library exports a small C ABI around one opaque handle:
//!
//! | symbol                             | signature                                        |
//! |------------------------------------|--------------------------------------------------|
//! | `seamtex_create`                   | `() -> *mut Handle`                              |
//! | `seamtex_destroy`                  | `(*mut Handle)`                                  |
//! | `seamtex_load_mesh`                | `(*mut Handle, *const c_char, *const u8, usize) -> i32` |
//! | `seamtex_face_count`               | `(*const Handle) -> usize`                       |
//! | `seamtex_positions`                | `(*const Handle) -> *const f32`                  |
//! | `seamtex_uvs`                      | `(*const Handle, i32 mirror_v) -> *const f32`    |
//! | `seamtex_allocate_image_buffers`   | `(*mut Handle, u32, u32) -> i32`                 |
//! | `seamtex_image_buf`                | `(*mut Handle, *mut usize) -> *mut u8`           |
//! | `seamtex_output_buf`               | `(*const Handle, *mut usize) -> *const u8`       |
//! | `seamtex_compressed_buf`           | `(*const Handle, *mut usize) -> *const u8`       |
//! | `seamtex_smooth`                   | `(*mut Handle, f32) -> i32`                      |
//! | `seamtex_compress`                 | `(*mut Handle) -> i32`                           |
//! | `seamtex_compress_and_smooth`      | `(*mut Handle, f32) -> i32`                      |
//! | `seamtex_last_error`               | `(*const Handle) -> *const c_char`               |
//!
//! Status codes are 0 on success. Returned buffers are owned by the handle
//! and stay valid until the next call that mutates it.

use std::ffi::{c_char, c_void, CStr, CString};
use std::path::Path;

use libloading::{Library, Symbol};
use tracing::info;

use crate::consts::{POSITION_FLOATS_PER_FACE, UV_FLOATS_PER_FACE};
use crate::error::{Result, SeamtexError};

use super::{TextureProcessor, UvOrientation};

type CreateFn = unsafe extern "C" fn() -> *mut c_void;
type DestroyFn = unsafe extern "C" fn(*mut c_void);
type LoadMeshFn = unsafe extern "C" fn(*mut c_void, *const c_char, *const u8, usize) -> i32;
type FaceCountFn = unsafe extern "C" fn(*const c_void) -> usize;
type PositionsFn = unsafe extern "C" fn(*const c_void) -> *const f32;
type UvsFn = unsafe extern "C" fn(*const c_void, i32) -> *const f32;
type AllocateFn = unsafe extern "C" fn(*mut c_void, u32, u32) -> i32;
type ImageBufFn = unsafe extern "C" fn(*mut c_void, *mut usize) -> *mut u8;
type ReadBufFn = unsafe extern "C" fn(*const c_void, *mut usize) -> *const u8;
type AlphaOpFn = unsafe extern "C" fn(*mut c_void, f32) -> i32;
type OpFn = unsafe extern "C" fn(*mut c_void) -> i32;
type LastErrorFn = unsafe extern "C" fn(*const c_void) -> *const c_char;

/// Function table resolved once at load time.
struct Api {
    destroy: DestroyFn,
    load_mesh: LoadMeshFn,
    face_count: FaceCountFn,
    positions: PositionsFn,
    uvs: UvsFn,
    allocate: AllocateFn,
    image_buf: ImageBufFn,
    output_buf: ReadBufFn,
    compressed_buf: ReadBufFn,
    smooth: AlphaOpFn,
    compress: OpFn,
    compress_and_smooth: AlphaOpFn,
    last_error: LastErrorFn,
}

pub struct NativeProcessor {
    name: String,
    api: Api,
    handle: *mut c_void,
    // Dropped after `handle` is destroyed in `Drop`.
    _lib: Library,
}

unsafe fn symbol<T: Copy>(lib: &Library, path: &str, name: &str) -> Result<T> {
    let mut bytes = name.as_bytes().to_vec();
    bytes.push(0);
    let sym: Symbol<T> = lib.get(&bytes).map_err(|e| SeamtexError::BackendLoad {
        path: path.to_string(),
        message: format!("symbol {name} not found: {e}"),
    })?;
    Ok(*sym)
}

impl NativeProcessor {
    /// Load the shared library at `path` and create a processor handle.
    pub fn open(path: &Path) -> Result<Self> {
        let path_str = path.display().to_string();
        if !path.exists() {
            return Err(SeamtexError::BackendLoad {
                path: path_str,
                message: "file not found".into(),
            });
        }

        unsafe {
            let lib = Library::new(path).map_err(|e| SeamtexError::BackendLoad {
                path: path_str.clone(),
                message: e.to_string(),
            })?;

            let create: CreateFn = symbol(&lib, &path_str, "seamtex_create")?;
            let api = Api {
                destroy: symbol(&lib, &path_str, "seamtex_destroy")?,
                load_mesh: symbol(&lib, &path_str, "seamtex_load_mesh")?,
                face_count: symbol(&lib, &path_str, "seamtex_face_count")?,
                positions: symbol(&lib, &path_str, "seamtex_positions")?,
                uvs: symbol(&lib, &path_str, "seamtex_uvs")?,
                allocate: symbol(&lib, &path_str, "seamtex_allocate_image_buffers")?,
                image_buf: symbol(&lib, &path_str, "seamtex_image_buf")?,
                output_buf: symbol(&lib, &path_str, "seamtex_output_buf")?,
                compressed_buf: symbol(&lib, &path_str, "seamtex_compressed_buf")?,
                smooth: symbol(&lib, &path_str, "seamtex_smooth")?,
                compress: symbol(&lib, &path_str, "seamtex_compress")?,
                compress_and_smooth: symbol(&lib, &path_str, "seamtex_compress_and_smooth")?,
                last_error: symbol(&lib, &path_str, "seamtex_last_error")?,
            };

            let handle = create();
            if handle.is_null() {
                return Err(SeamtexError::BackendLoad {
                    path: path_str,
                    message: "seamtex_create returned null".into(),
                });
            }

            info!(path = %path_str, "Processing module loaded");
            Ok(Self {
                name: path_str,
                api,
                handle,
                _lib: lib,
            })
        }
    }

    /// Turn a status code into a `Result`, pulling the library's message on failure.
    fn check(&self, op: &str, status: i32) -> Result<()> {
        if status == 0 {
            return Ok(());
        }
        let message = unsafe {
            let ptr = (self.api.last_error)(self.handle);
            if ptr.is_null() {
                String::new()
            } else {
                CStr::from_ptr(ptr).to_string_lossy().into_owned()
            }
        };
        Err(SeamtexError::Processor(format!(
            "{op} failed (status {status}): {message}"
        )))
    }

    fn copy_floats(&self, what: &str, ptr: *const f32, len: usize) -> Result<Vec<f32>> {
        if len == 0 {
            return Ok(Vec::new());
        }
        if ptr.is_null() {
            return Err(SeamtexError::Processor(format!("{what} buffer is null")));
        }
        Ok(unsafe { std::slice::from_raw_parts(ptr, len) }.to_vec())
    }

    fn read_buf(&self, f: ReadBufFn) -> &[u8] {
        let mut len = 0usize;
        unsafe {
            let ptr = f(self.handle, &mut len);
            if ptr.is_null() || len == 0 {
                &[]
            } else {
                std::slice::from_raw_parts(ptr, len)
            }
        }
    }
}

impl TextureProcessor for NativeProcessor {
    fn name(&self) -> &str {
        &self.name
    }

    fn load_mesh(&mut self, name: &str, bytes: &[u8]) -> Result<()> {
        let c_name = CString::new(name)
            .map_err(|_| SeamtexError::Processor(format!("invalid mesh name {name:?}")))?;
        let status = unsafe {
            (self.api.load_mesh)(self.handle, c_name.as_ptr(), bytes.as_ptr(), bytes.len())
        };
        self.check("load_mesh", status)
    }

    fn face_count(&self) -> usize {
        unsafe { (self.api.face_count)(self.handle) }
    }

    fn positions(&self) -> Result<Vec<f32>> {
        let len = self.face_count() * POSITION_FLOATS_PER_FACE;
        let ptr = unsafe { (self.api.positions)(self.handle) };
        self.copy_floats("position", ptr, len)
    }

    fn uvs(&self, orientation: UvOrientation) -> Result<Vec<f32>> {
        let len = self.face_count() * UV_FLOATS_PER_FACE;
        let mirror = i32::from(orientation == UvOrientation::MirrorV);
        let ptr = unsafe { (self.api.uvs)(self.handle, mirror) };
        self.copy_floats("uv", ptr, len)
    }

    fn allocate_image_buffers(&mut self, width: u32, height: u32) -> Result<()> {
        let status = unsafe { (self.api.allocate)(self.handle, width, height) };
        self.check("allocate_image_buffers", status)
    }

    fn image_buf_mut(&mut self) -> &mut [u8] {
        let mut len = 0usize;
        unsafe {
            let ptr = (self.api.image_buf)(self.handle, &mut len);
            if ptr.is_null() || len == 0 {
                &mut []
            } else {
                std::slice::from_raw_parts_mut(ptr, len)
            }
        }
    }

    fn output_buf(&self) -> &[u8] {
        self.read_buf(self.api.output_buf)
    }

    fn compressed_buf(&self) -> &[u8] {
        self.read_buf(self.api.compressed_buf)
    }

    fn smooth(&mut self, alpha: f32) -> Result<()> {
        let status = unsafe { (self.api.smooth)(self.handle, alpha) };
        self.check("smooth", status)
    }

    fn compress(&mut self) -> Result<()> {
        let status = unsafe { (self.api.compress)(self.handle) };
        self.check("compress", status)
    }

    fn compress_and_smooth(&mut self, alpha: f32) -> Result<()> {
        let status = unsafe { (self.api.compress_and_smooth)(self.handle, alpha) };
        self.check("compress_and_smooth", status)
    }
}

impl Drop for NativeProcessor {
    fn drop(&mut self) {
        unsafe { (self.api.destroy)(self.handle) };
    }
}
