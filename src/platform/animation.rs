//! `requestAnimationFrame` loop
//!
//! Each frame schedules the next one only if the frame callback asked to
//! continue and nobody stopped the loop. The pending request and its closure
//! live in a `FrameSlot`, so stopping (or dropping the handle) cancels the
//! request and frees the closure.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use super::slot::FrameSlot;
use crate::driver::FrameControl;

type FrameCallback = Closure<dyn FnMut(f64)>;

/// Cancellation handle returned by `AnimationLoop::start`
///
/// Dropping the handle stops the loop.
pub struct LoopHandle {
    slot: Rc<FrameSlot<FrameCallback>>,
}

impl LoopHandle {
    /// Stop scheduling frames and cancel the pending request
    pub fn stop(&self) {
        if self.slot.is_stopped() {
            return;
        }
        if let Some(id) = self.slot.stop() {
            if let Some(window) = web_sys::window() {
                let _ = window.cancel_animation_frame(id);
            }
        }
        log::debug!("Animation loop stopped");
    }

    pub fn is_running(&self) -> bool {
        !self.slot.is_stopped()
    }
}

impl Drop for LoopHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Display-refresh driven loop
pub struct AnimationLoop;

impl AnimationLoop {
    /// Call `on_frame` with the rAF timestamp (ms) until it returns `Halt`
    /// or the handle is stopped
    pub fn start<F>(on_frame: F) -> LoopHandle
    where
        F: FnMut(f64) -> FrameControl + 'static,
    {
        let slot = Rc::new(FrameSlot::new());
        schedule(slot.clone(), Rc::new(RefCell::new(on_frame)));
        log::debug!("Animation loop started");
        LoopHandle { slot }
    }
}

fn schedule<F>(slot: Rc<FrameSlot<FrameCallback>>, on_frame: Rc<RefCell<F>>)
where
    F: FnMut(f64) -> FrameControl + 'static,
{
    if slot.is_stopped() {
        return;
    }
    let Some(window) = web_sys::window() else {
        log::error!("No window, animation loop not scheduled");
        slot.stop();
        return;
    };

    let frame_slot = slot.clone();
    let closure = Closure::once(move |time: f64| {
        // Released once this call returns
        let _running = frame_slot.fire();
        if frame_slot.is_stopped() {
            return;
        }
        let control = {
            let mut f = on_frame.borrow_mut();
            (*f)(time)
        };
        match control {
            FrameControl::Continue => schedule(frame_slot, on_frame),
            FrameControl::Halt => {
                frame_slot.stop();
            }
        }
    });

    match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
        Ok(id) => slot.arm(id, closure),
        Err(err) => {
            log::error!("requestAnimationFrame failed: {:?}", err);
            slot.stop();
        }
    }
}
