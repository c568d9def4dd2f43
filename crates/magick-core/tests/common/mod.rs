//! In-memory stand-in for the native library
//!
//! Handles are plain addresses tracked in a live set; releasing an unknown or already
//! released handle panics, so a double free fails the test that caused it.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::ffi::{c_char, CStr, CString};

use magick_core::{
    DrawingWandEntries, ExceptionSlot, MagickImageEntries, NativeException, Quantum, QuantumType,
    RawHandle,
};

/// Sample at `value` of the full range (0.0 black, 1.0 white).
pub fn unit_sample(value: f64) -> QuantumType {
    QuantumType::from_f64(value * <QuantumType as Quantum>::MAX)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub width: usize,
    pub height: usize,
}

#[derive(Default)]
struct State {
    next: usize,
    /// live handle -> image size
    live: BTreeMap<usize, Size>,
    released: Vec<usize>,
    calls: Vec<String>,
    failures: HashMap<String, NativeException>,
    artifacts: HashMap<(usize, String), String>,
    /// Strings handed out by get_artifact; kept alive for the fake's lifetime
    strings: Vec<CString>,
}

#[derive(Default)]
pub struct FakeMagick {
    state: RefCell<State>,
}

fn c_str(ptr: *const c_char) -> String {
    assert!(!ptr.is_null(), "null string passed to the native library");
    unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned()
}

/// Leading `WxH` of a geometry string.
fn parse_size(geometry: &str) -> Size {
    let mut parts = geometry
        .split(|c: char| !c.is_ascii_digit())
        .map(|part| part.parse().unwrap_or(0));
    Size {
        width: parts.next().unwrap_or(0),
        height: parts.next().unwrap_or(0),
    }
}

impl FakeMagick {
    pub fn new() -> Self {
        let fake = Self::default();
        fake.state.borrow_mut().next = 0x1000;
        fake
    }

    /// Make every later call to `entry` raise `code`.
    pub fn fail(&self, entry: &str, code: i32, message: &str) {
        self.state
            .borrow_mut()
            .failures
            .insert(entry.to_string(), NativeException::new(code, message));
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.borrow().calls.clone()
    }

    pub fn call_names(&self) -> Vec<String> {
        self.calls()
            .iter()
            .map(|call| call.split(' ').next().unwrap_or_default().to_string())
            .collect()
    }

    pub fn clear_calls(&self) {
        self.state.borrow_mut().calls.clear();
    }

    pub fn live_count(&self) -> usize {
        self.state.borrow().live.len()
    }

    pub fn is_live(&self, raw: RawHandle) -> bool {
        self.state.borrow().live.contains_key(&raw.addr())
    }

    pub fn released(&self) -> Vec<usize> {
        self.state.borrow().released.clone()
    }

    /// Allocate a handle outside of any entry point, e.g. an image list.
    pub fn allocate(&self, size: Size) -> RawHandle {
        let mut state = self.state.borrow_mut();
        state.next += 0x10;
        let addr = state.next;
        state.live.insert(addr, size);
        RawHandle::from_addr(addr)
    }

    fn size_of(&self, raw: RawHandle) -> Size {
        match self.state.borrow().live.get(&raw.addr()) {
            Some(size) => *size,
            None => panic!("use of unknown handle {:?}", raw),
        }
    }

    fn record(&self, call: String) {
        self.state.borrow_mut().calls.push(call);
    }

    /// Raise the configured failure; returns whether it is error-class.
    fn raise(&self, entry: &str, exception: &mut ExceptionSlot) -> bool {
        let failure = self.state.borrow().failures.get(entry).cloned();
        match failure {
            Some(failure) => {
                let is_error = !failure.is_warning();
                exception.raise(failure);
                is_error
            }
            None => false,
        }
    }

    fn produce(&self, entry: &str, exception: &mut ExceptionSlot, size: Size) -> RawHandle {
        if self.raise(entry, exception) {
            return RawHandle::NULL;
        }
        self.allocate(size)
    }

    fn release(&self, raw: RawHandle) {
        let mut state = self.state.borrow_mut();
        if state.live.remove(&raw.addr()).is_none() {
            panic!("release of unknown or released handle {:?}", raw);
        }
        state.released.push(raw.addr());
    }
}

unsafe impl MagickImageEntries for FakeMagick {
    fn magick_image_dispose(&self, instance: RawHandle) {
        self.release(instance);
    }

    fn magick_image_create(&self, exception: &mut ExceptionSlot) -> RawHandle {
        self.record("create".to_string());
        self.produce("create", exception, Size { width: 0, height: 0 })
    }

    fn magick_image_read_file(&self, file_name: *const c_char, exception: &mut ExceptionSlot) -> RawHandle {
        self.record(format!("read_file {}", c_str(file_name)));
        self.produce("read_file", exception, Size { width: 100, height: 50 })
    }

    #[cfg(not(feature = "minimal"))]
    fn magick_image_read_blob(&self, data: *const u8, data_length: usize, exception: &mut ExceptionSlot) -> RawHandle {
        let data = unsafe { std::slice::from_raw_parts(data, data_length) };
        self.record(format!("read_blob {}", data.len()));
        self.produce("read_blob", exception, Size { width: data.len(), height: 1 })
    }

    fn magick_image_width(&self, instance: RawHandle) -> usize {
        self.size_of(instance).width
    }

    fn magick_image_height(&self, instance: RawHandle) -> usize {
        self.size_of(instance).height
    }

    fn magick_image_clone_image(&self, instance: RawHandle, exception: &mut ExceptionSlot) -> RawHandle {
        self.record("clone_image".to_string());
        self.produce("clone_image", exception, self.size_of(instance))
    }

    fn magick_image_adaptive_blur(
        &self,
        instance: RawHandle,
        radius: f64,
        sigma: f64,
        exception: &mut ExceptionSlot,
    ) -> RawHandle {
        self.record(format!("adaptive_blur {} {}", radius, sigma));
        self.produce("adaptive_blur", exception, self.size_of(instance))
    }

    fn magick_image_blur(
        &self,
        instance: RawHandle,
        radius: f64,
        sigma: f64,
        channels: u64,
        exception: &mut ExceptionSlot,
    ) -> RawHandle {
        self.record(format!("blur {} {} {:#x}", radius, sigma, channels));
        self.produce("blur", exception, self.size_of(instance))
    }

    fn magick_image_resize(
        &self,
        _instance: RawHandle,
        geometry: *const c_char,
        exception: &mut ExceptionSlot,
    ) -> RawHandle {
        let geometry = c_str(geometry);
        self.record(format!("resize {}", geometry));
        self.produce("resize", exception, parse_size(&geometry))
    }

    fn magick_image_crop(
        &self,
        _instance: RawHandle,
        geometry: *const c_char,
        gravity: i32,
        exception: &mut ExceptionSlot,
    ) -> RawHandle {
        let geometry = c_str(geometry);
        self.record(format!("crop {} {}", geometry, gravity));
        self.produce("crop", exception, parse_size(&geometry))
    }

    fn magick_image_add_noise(
        &self,
        instance: RawHandle,
        noise_type: i32,
        attenuate: f64,
        channels: u64,
        exception: &mut ExceptionSlot,
    ) -> RawHandle {
        self.record(format!("add_noise {} {} {:#x}", noise_type, attenuate, channels));
        self.produce("add_noise", exception, self.size_of(instance))
    }

    fn magick_image_interpolative_resize(
        &self,
        _instance: RawHandle,
        geometry: *const c_char,
        method: i32,
        exception: &mut ExceptionSlot,
    ) -> RawHandle {
        let geometry = c_str(geometry);
        self.record(format!("interpolative_resize {} {}", geometry, method));
        self.produce("interpolative_resize", exception, parse_size(&geometry))
    }

    fn magick_image_convolve(
        &self,
        instance: RawHandle,
        matrix: *const f64,
        matrix_order: usize,
        exception: &mut ExceptionSlot,
    ) -> RawHandle {
        let values = unsafe { std::slice::from_raw_parts(matrix, matrix_order * matrix_order) };
        self.record(format!("convolve {} {}", matrix_order, values.iter().sum::<f64>()));
        self.produce("convolve", exception, self.size_of(instance))
    }

    fn magick_image_auto_orient(&self, instance: RawHandle, exception: &mut ExceptionSlot) -> RawHandle {
        self.record("auto_orient".to_string());
        let size = self.size_of(instance);
        self.produce(
            "auto_orient",
            exception,
            Size {
                width: size.height,
                height: size.width,
            },
        )
    }

    fn magick_image_set_artifact(&self, instance: RawHandle, name: *const c_char, value: *const c_char) {
        let (name, value) = (c_str(name), c_str(value));
        self.record(format!("set_artifact {} {}", name, value));
        self.state
            .borrow_mut()
            .artifacts
            .insert((instance.addr(), name), value);
    }

    fn magick_image_get_artifact(&self, instance: RawHandle, name: *const c_char) -> *const c_char {
        let name = c_str(name);
        self.record(format!("get_artifact {}", name));
        let mut state = self.state.borrow_mut();
        let Some(value) = state.artifacts.get(&(instance.addr(), name)).cloned() else {
            return std::ptr::null();
        };
        let value = CString::new(value).unwrap();
        let ptr = value.as_ptr();
        state.strings.push(value);
        ptr
    }

    fn magick_image_deskew(&self, instance: RawHandle, threshold: f64, exception: &mut ExceptionSlot) -> RawHandle {
        self.record(format!("deskew {}", threshold));
        self.state
            .borrow_mut()
            .artifacts
            .insert((instance.addr(), "deskew:auto-crop".to_string()), "true".to_string());
        self.produce("deskew", exception, self.size_of(instance))
    }

    fn magick_image_level(
        &self,
        _instance: RawHandle,
        black_point: QuantumType,
        white_point: QuantumType,
        gamma: f64,
        channels: u64,
        exception: &mut ExceptionSlot,
    ) {
        self.record(format!("level {:?} {:?} {} {:#x}", black_point, white_point, gamma, channels));
        self.raise("level", exception);
    }

    #[cfg(not(feature = "minimal"))]
    fn magick_image_export_pixels(
        &self,
        _instance: RawHandle,
        x: isize,
        y: isize,
        width: usize,
        height: usize,
        map: *const c_char,
        pixels: *mut QuantumType,
        pixels_length: usize,
        exception: &mut ExceptionSlot,
    ) {
        let map = c_str(map);
        self.record(format!("export_pixels {} {} {} {} {}", x, y, width, height, map));
        if self.raise("export_pixels", exception) {
            return;
        }
        let pixels = unsafe { std::slice::from_raw_parts_mut(pixels, pixels_length) };
        let count = (width * height * map.len()).min(pixels.len());
        for (index, pixel) in pixels.iter_mut().take(count).enumerate() {
            *pixel = unit_sample((index % 2) as f64);
        }
    }

    fn magick_image_append_list(&self, images: RawHandle, stack: bool, exception: &mut ExceptionSlot) -> RawHandle {
        self.record(format!("append_list {}", stack));
        let size = self.size_of(images);
        self.produce("append_list", exception, size)
    }

    fn magick_image_dispose_list(&self, images: RawHandle, exception: &mut ExceptionSlot) {
        self.record("dispose_list".to_string());
        self.raise("dispose_list", exception);
        self.release(images);
    }

    fn magick_image_remove_artifact(&self, instance: RawHandle, value1: *const c_char, exception: &mut ExceptionSlot) {
        let name = c_str(value1);
        self.record(format!("remove_artifact {}", name));
        self.raise("remove_artifact", exception);
        self.state.borrow_mut().artifacts.remove(&(instance.addr(), name));
    }
}

unsafe impl DrawingWandEntries for FakeMagick {
    fn drawing_wand_dispose(&self, instance: RawHandle) {
        self.release(instance);
    }

    fn drawing_wand_create(&self, image: RawHandle, exception: &mut ExceptionSlot) -> RawHandle {
        self.record("wand_create".to_string());
        self.produce("wand_create", exception, self.size_of(image))
    }

    fn drawing_wand_render(&self, _instance: RawHandle, exception: &mut ExceptionSlot) {
        self.record("render".to_string());
        self.raise("render", exception);
    }

    fn drawing_wand_path_start(&self, _instance: RawHandle, exception: &mut ExceptionSlot) {
        self.record("path_start".to_string());
        self.raise("path_start", exception);
    }

    fn drawing_wand_path_finish(&self, _instance: RawHandle, exception: &mut ExceptionSlot) {
        self.record("path_finish".to_string());
        self.raise("path_finish", exception);
    }

    fn drawing_wand_path_close(&self, _instance: RawHandle, exception: &mut ExceptionSlot) {
        self.record("path_close".to_string());
        self.raise("path_close", exception);
    }

    fn drawing_wand_path_move_to_abs(&self, _instance: RawHandle, x: f64, y: f64, exception: &mut ExceptionSlot) {
        self.record(format!("path_move_to_abs {} {}", x, y));
        self.raise("path_move_to_abs", exception);
    }

    fn drawing_wand_path_move_to_rel(&self, _instance: RawHandle, x: f64, y: f64, exception: &mut ExceptionSlot) {
        self.record(format!("path_move_to_rel {} {}", x, y));
        self.raise("path_move_to_rel", exception);
    }

    fn drawing_wand_path_line_to_abs(&self, _instance: RawHandle, x: f64, y: f64, exception: &mut ExceptionSlot) {
        self.record(format!("path_line_to_abs {} {}", x, y));
        self.raise("path_line_to_abs", exception);
    }

    fn drawing_wand_path_line_to_rel(&self, _instance: RawHandle, x: f64, y: f64, exception: &mut ExceptionSlot) {
        self.record(format!("path_line_to_rel {} {}", x, y));
        self.raise("path_line_to_rel", exception);
    }

    fn drawing_wand_path_line_to_horizontal_abs(&self, _instance: RawHandle, x: f64, exception: &mut ExceptionSlot) {
        self.record(format!("path_line_to_horizontal_abs {}", x));
        self.raise("path_line_to_horizontal_abs", exception);
    }

    fn drawing_wand_path_line_to_horizontal_rel(&self, _instance: RawHandle, x: f64, exception: &mut ExceptionSlot) {
        self.record(format!("path_line_to_horizontal_rel {}", x));
        self.raise("path_line_to_horizontal_rel", exception);
    }

    fn drawing_wand_path_line_to_vertical_abs(&self, _instance: RawHandle, y: f64, exception: &mut ExceptionSlot) {
        self.record(format!("path_line_to_vertical_abs {}", y));
        self.raise("path_line_to_vertical_abs", exception);
    }

    fn drawing_wand_path_line_to_vertical_rel(&self, _instance: RawHandle, y: f64, exception: &mut ExceptionSlot) {
        self.record(format!("path_line_to_vertical_rel {}", y));
        self.raise("path_line_to_vertical_rel", exception);
    }

    fn drawing_wand_path_curve_to_abs(
        &self,
        _instance: RawHandle,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        x: f64,
        y: f64,
        exception: &mut ExceptionSlot,
    ) {
        self.record(format!("path_curve_to_abs {} {} {} {} {} {}", x1, y1, x2, y2, x, y));
        self.raise("path_curve_to_abs", exception);
    }

    fn drawing_wand_path_curve_to_rel(
        &self,
        _instance: RawHandle,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        x: f64,
        y: f64,
        exception: &mut ExceptionSlot,
    ) {
        self.record(format!("path_curve_to_rel {} {} {} {} {} {}", x1, y1, x2, y2, x, y));
        self.raise("path_curve_to_rel", exception);
    }

    fn drawing_wand_path_arc_abs(
        &self,
        _instance: RawHandle,
        x: f64,
        y: f64,
        radius_x: f64,
        radius_y: f64,
        rotation_x: f64,
        use_large_arc: bool,
        use_sweep: bool,
        exception: &mut ExceptionSlot,
    ) {
        self.record(format!(
            "path_arc_abs {} {} {} {} {} {} {}",
            x, y, radius_x, radius_y, rotation_x, use_large_arc, use_sweep
        ));
        self.raise("path_arc_abs", exception);
    }

    fn drawing_wand_path_arc_rel(
        &self,
        _instance: RawHandle,
        x: f64,
        y: f64,
        radius_x: f64,
        radius_y: f64,
        rotation_x: f64,
        use_large_arc: bool,
        use_sweep: bool,
        exception: &mut ExceptionSlot,
    ) {
        self.record(format!(
            "path_arc_rel {} {} {} {} {} {} {}",
            x, y, radius_x, radius_y, rotation_x, use_large_arc, use_sweep
        ));
        self.raise("path_arc_rel", exception);
    }
}
