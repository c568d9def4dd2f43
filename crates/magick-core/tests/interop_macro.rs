//! Attribute macro front end
//!
//! Declarations expanded in place by `magick-interop` produce the same wrapper shape as the
//! build script output, with runtime paths pointing at `::magick_core`.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::ffi::{c_char, CStr};

use magick_core::{ExceptionSlot, MagickError, MutatorState, NativeException, RawHandle};
use magick_interop::{native_interop, paths};

/// A resizable test resource.
#[native_interop(name = "Widget")]
pub trait NativeWidget {
    #[throws]
    fn create(size: u32) -> Handle;

    fn size(&self) -> u32;

    #[throws]
    fn grow(&self, #[default(2)] factor: u32) -> Handle;

    #[throws]
    #[cleanup(name = "Widget_Forget", args = "self, label")]
    fn tag(&self, label: &str);

    /// Updates the widget in place and hands back the same instance.
    #[set_instance]
    fn touch(&self) -> Handle;
}

#[paths(segment = "Step")]
pub trait Route {
    fn go(&self, distance: f64);

    fn stop(&self);
}

#[derive(Default)]
struct Widgets {
    next: RefCell<usize>,
    live: RefCell<BTreeSet<usize>>,
    sizes: RefCell<Vec<(usize, u32)>>,
    calls: RefCell<Vec<String>>,
}

impl Widgets {
    fn allocate(&self, size: u32) -> RawHandle {
        let mut next = self.next.borrow_mut();
        *next += 8;
        self.live.borrow_mut().insert(*next);
        self.sizes.borrow_mut().push((*next, size));
        RawHandle::from_addr(*next)
    }

    fn size_of(&self, raw: RawHandle) -> u32 {
        self.sizes
            .borrow()
            .iter()
            .find(|(addr, _)| *addr == raw.addr())
            .map(|(_, size)| *size)
            .unwrap()
    }

    fn label(ptr: *const c_char) -> String {
        unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned()
    }
}

unsafe impl WidgetEntries for Widgets {
    fn widget_dispose(&self, instance: RawHandle) {
        assert!(self.live.borrow_mut().remove(&instance.addr()), "double release");
    }

    fn widget_create(&self, size: u32, exception: &mut ExceptionSlot) -> RawHandle {
        if size == 0 {
            exception.raise(NativeException::new(410, "size must be positive"));
            return RawHandle::NULL;
        }
        self.allocate(size)
    }

    fn widget_size(&self, instance: RawHandle) -> u32 {
        self.size_of(instance)
    }

    fn widget_grow(&self, instance: RawHandle, factor: u32, _exception: &mut ExceptionSlot) -> RawHandle {
        self.allocate(self.size_of(instance) * factor)
    }

    fn widget_tag(&self, _instance: RawHandle, label: *const c_char, _exception: &mut ExceptionSlot) {
        self.calls.borrow_mut().push(format!("tag {}", Self::label(label)));
    }

    fn widget_touch(&self, instance: RawHandle) -> RawHandle {
        self.calls.borrow_mut().push("touch".to_string());
        instance
    }

    fn widget_forget(&self, _instance: RawHandle, label: *const c_char, _exception: &mut ExceptionSlot) {
        self.calls.borrow_mut().push(format!("forget {}", Self::label(label)));
    }
}

#[test]
fn test_wrapper_from_macro() {
    let widgets = Widgets::default();
    let widget = NativeWidget::from_handle(NativeWidget::create(&widgets, 3).unwrap());
    assert_eq!(widget.size(), 3);

    let grown = NativeWidget::from_handle(widget.grow(None).unwrap());
    assert_eq!(grown.size(), 6);
    let tripled = NativeWidget::from_handle(widget.grow(Some(3)).unwrap());
    assert_eq!(tripled.size(), 9);

    drop((widget, grown, tripled));
    assert!(widgets.live.borrow().is_empty());
}

#[test]
fn test_native_errors_from_macro() {
    let widgets = Widgets::default();
    let error = NativeWidget::create(&widgets, 0).unwrap_err();
    assert_eq!(error, MagickError::Native(NativeException::new(410, "size must be positive")));
}

#[test]
fn test_cleanup_forwards_parameter() {
    let widgets = Widgets::default();
    let widget = NativeWidget::from_handle(NativeWidget::create(&widgets, 1).unwrap());
    widget.tag("blue").unwrap();
    assert_eq!(*widgets.calls.borrow(), vec!["tag blue", "forget blue"]);
}

#[test]
fn test_mutator_from_macro() {
    let widgets = Widgets::default();
    let widget = NativeWidget::from_handle(NativeWidget::create(&widgets, 2).unwrap());

    let mut mutator = widget.mutator();
    mutator.grow(Some(5)).unwrap();
    assert!(mutator.grow(None).is_err());
    assert_eq!(mutator.state(), MutatorState::Bound);

    let grown = NativeWidget::from_handle(mutator.get_result().unwrap());
    assert_eq!(grown.size(), 10);
    assert_eq!(widgets.live.borrow().len(), 2);
}

#[test]
fn test_in_place_update_keeps_single_owner() {
    let widgets = Widgets::default();
    let mut widget = NativeWidget::from_handle(NativeWidget::create(&widgets, 4).unwrap());
    let instance = widget.instance();
    widget.touch();
    assert_eq!(widget.instance(), instance);
    drop(widget);
    assert!(widgets.live.borrow().is_empty());
}

#[test]
fn test_mutator_rejects_source_handed_back() {
    let widgets = Widgets::default();
    let widget = NativeWidget::from_handle(NativeWidget::create(&widgets, 4).unwrap());
    {
        let mut mutator = widget.mutator();
        let error = mutator.touch().unwrap_err();
        assert!(matches!(error, MagickError::InvalidOperation(_)));
        assert_eq!(mutator.state(), MutatorState::Unbound);
        assert!(mutator.get_result().is_none());
    }
    assert!(widgets.live.borrow().contains(&widget.instance().addr()));
    assert_eq!(*widgets.calls.borrow(), vec!["touch"]);

    drop(widget);
    assert!(widgets.live.borrow().is_empty());
}

#[test]
fn test_paths_from_macro() {
    let mut route = Route::new();
    route.go(2.5).stop();
    assert_eq!(route.segments(), &[Step::Go { distance: 2.5 }, Step::Stop]);
    assert!(!route.is_empty());
}
