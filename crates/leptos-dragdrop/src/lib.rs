//! Leptos DragDrop Utilities
//!
//! Pointer-event drag-and-drop for Leptos, generic over the dragged item key
//! `K` and the drop target `T`.
//! A press only becomes a drag after the pointer moves past a threshold, so
//! plain clicks on a card still reach its click handler.

use leptos::ev;
use leptos::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

/// Movement threshold in pixels to start dragging
pub const DRAG_THRESHOLD_PX: i32 = 5;

/// How long `drag_just_ended` stays set after a drop
const CLICK_SUPPRESS_MS: i32 = 100;

/// DnD state signals
pub struct DndSignals<K: Send + Sync + 'static, T: Send + Sync + 'static> {
    /// Item being dragged
    pub dragging: RwSignal<Option<K>>,
    /// Item pressed but not yet moved past the threshold
    pub pending: RwSignal<Option<K>>,
    /// Target under the pointer
    pub drop_target: RwSignal<Option<T>>,
    /// Set briefly after a drop so the trailing click can be ignored
    pub drag_just_ended: RwSignal<bool>,
    /// Pointer position at mousedown
    pub start: RwSignal<(i32, i32)>,
}

impl<K: Send + Sync + 'static, T: Send + Sync + 'static> Clone for DndSignals<K, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K: Send + Sync + 'static, T: Send + Sync + 'static> Copy for DndSignals<K, T> {}

impl<K, T> DndSignals<K, T>
where
    K: Clone + PartialEq + Send + Sync + 'static,
    T: Clone + PartialEq + Send + Sync + 'static,
{
    /// Reactive: is `key` the item being dragged
    pub fn is_dragging(&self, key: &K) -> bool {
        self.dragging.with(|d| d.as_ref() == Some(key))
    }

    /// Reactive: is `target` highlighted as the drop target
    pub fn is_target(&self, target: &T) -> bool {
        self.drop_target.with(|t| t.as_ref() == Some(target))
    }
}

pub fn create_dnd_signals<K, T>() -> DndSignals<K, T>
where
    K: Send + Sync + 'static,
    T: Send + Sync + 'static,
{
    DndSignals {
        dragging: RwSignal::new(None),
        pending: RwSignal::new(None),
        drop_target: RwSignal::new(None),
        drag_just_ended: RwSignal::new(false),
        start: RwSignal::new((0, 0)),
    }
}

/// True once the pointer has left the dead zone around `start`
pub fn exceeds_threshold(start: (i32, i32), current: (i32, i32)) -> bool {
    (current.0 - start.0).abs() > DRAG_THRESHOLD_PX || (current.1 - start.1).abs() > DRAG_THRESHOLD_PX
}

/// End drag operation
pub fn end_drag<K, T>(dnd: &DndSignals<K, T>)
where
    K: Send + Sync + 'static,
    T: Send + Sync + 'static,
{
    // Owner may already be gone when a document listener fires late
    if dnd.drag_just_ended.try_set(true).is_some() {
        return;
    }
    dnd.dragging.set(None);
    dnd.drop_target.set(None);
    dnd.pending.set(None);

    if let Some(win) = web_sys::window() {
        let flag = dnd.drag_just_ended;
        let cb = Closure::<dyn FnMut()>::new(move || {
            let _ = flag.try_set(false);
        });
        let _ = win.set_timeout_with_callback_and_timeout_and_arguments_0(cb.as_ref().unchecked_ref(), CLICK_SUPPRESS_MS);
        cb.forget();
    }
}

/// Create mousedown handler for draggable items.
/// Records a pending drag with the start position.
pub fn make_on_mousedown<K, T>(dnd: DndSignals<K, T>, key: K) -> impl Fn(web_sys::MouseEvent) + Clone + 'static
where
    K: Clone + Send + Sync + 'static,
    T: Send + Sync + 'static,
{
    move |ev: web_sys::MouseEvent| {
        if ev.button() != 0 {
            return;
        }
        // Form controls inside a card keep their own behaviour
        if let Some(target) = ev.target() {
            if target.dyn_ref::<web_sys::HtmlInputElement>().is_some()
                || target.dyn_ref::<web_sys::HtmlButtonElement>().is_some()
                || target.dyn_ref::<web_sys::HtmlSelectElement>().is_some()
            {
                return;
            }
        }
        dnd.pending.set(Some(key.clone()));
        dnd.start.set((ev.client_x(), ev.client_y()));
    }
}

/// Create mouseenter handler for a drop target
pub fn make_on_target_mouseenter<K, T>(dnd: DndSignals<K, T>, target: T) -> impl Fn(web_sys::MouseEvent) + Clone + 'static
where
    K: Clone + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
{
    move |_ev: web_sys::MouseEvent| {
        if dnd.dragging.with_untracked(Option::is_some) {
            dnd.drop_target.set(Some(target.clone()));
        }
    }
}

/// Create mouseleave handler
pub fn make_on_mouseleave<K, T>(dnd: DndSignals<K, T>) -> impl Fn(web_sys::MouseEvent) + Copy + 'static
where
    K: Send + Sync + 'static,
    T: Send + Sync + 'static,
{
    move |_ev: web_sys::MouseEvent| {
        if dnd.dragging.with_untracked(Option::is_some) {
            dnd.drop_target.set(None);
        }
    }
}

/// What a mouseup means for the current press
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Release<K, T> {
    /// No press in progress
    Idle,
    /// Pressed and released in place; the trailing click must go through
    Click,
    /// Dragged, released outside any target
    Cancel,
    /// Dragged and released over `T`
    Drop(K, T),
}

/// Classify a mouseup from the pending, dragging and target state
pub fn classify_release<K, T>(pending: Option<K>, dragging: Option<K>, target: Option<T>) -> Release<K, T> {
    match (dragging, target) {
        (Some(dragged), Some(target)) => Release::Drop(dragged, target),
        (Some(_), None) => Release::Cancel,
        (None, _) if pending.is_some() => Release::Click,
        (None, _) => Release::Idle,
    }
}

/// Document mousemove listener: promotes a pending press to a drag.
/// Removed when the calling component is cleaned up.
pub fn bind_global_mousemove<K, T>(dnd: DndSignals<K, T>)
where
    K: Clone + Send + Sync + 'static,
    T: Send + Sync + 'static,
{
    let handle = window_event_listener(ev::mousemove, move |ev: web_sys::MouseEvent| {
        let (Some(pending), Some(dragging)) = (dnd.pending.try_get_untracked(), dnd.dragging.try_get_untracked()) else {
            return;
        };
        if dragging.is_some() || pending.is_none() {
            return;
        }
        let Some(start) = dnd.start.try_get_untracked() else {
            return;
        };
        if exceeds_threshold(start, (ev.client_x(), ev.client_y())) {
            dnd.dragging.set(pending);
        }
    });
    on_cleanup(move || handle.remove());
}

/// Bind global mouseup handler for drop detection.
///
/// `on_drop` runs only for a real drag released over a target. Also installs
/// the mousemove listener. Both are removed with the calling component.
pub fn bind_global_mouseup<K, T, F>(dnd: DndSignals<K, T>, on_drop: F)
where
    K: Clone + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
    F: Fn(K, T) + 'static,
{
    let handle = window_event_listener(ev::mouseup, move |_ev: web_sys::MouseEvent| {
        let (Some(pending), Some(dragging), Some(target)) = (
            dnd.pending.try_get_untracked(),
            dnd.dragging.try_get_untracked(),
            dnd.drop_target.try_get_untracked(),
        ) else {
            return;
        };

        match classify_release(pending, dragging, target) {
            Release::Idle => {}
            Release::Click => dnd.pending.set(None),
            Release::Cancel => end_drag(&dnd),
            Release::Drop(dragged, target) => {
                end_drag(&dnd);
                on_drop(dragged, target);
            }
        }
    });
    on_cleanup(move || handle.remove());

    bind_global_mousemove(dnd);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_separates_click_from_drag() {
        assert!(!exceeds_threshold((100, 100), (100, 100)));
        assert!(!exceeds_threshold((100, 100), (105, 95)));
        assert!(exceeds_threshold((100, 100), (106, 100)));
        assert!(exceeds_threshold((100, 100), (100, 94)));
    }

    #[test]
    fn test_release_in_place_is_a_click() {
        let release = classify_release::<&str, u8>(Some("card"), None, None);
        assert_eq!(release, Release::Click);
        // Pointer happened to be over a column, still only a click
        assert_eq!(classify_release(Some("card"), None, Some(2u8)), Release::Click);
    }

    #[test]
    fn test_release_after_drag() {
        assert_eq!(classify_release(Some("card"), Some("card"), Some(1u8)), Release::Drop("card", 1));
        assert_eq!(classify_release::<&str, u8>(Some("card"), Some("card"), None), Release::Cancel);
        assert_eq!(classify_release::<&str, u8>(None, None, None), Release::Idle);
    }
}
