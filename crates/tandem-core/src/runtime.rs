use crate::{FrameCallbackId, FrameClock};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

pub type PostedTaskId = u64;

struct FrameCallbackEntry {
    id: FrameCallbackId,
    callback: Option<Box<dyn FnOnce(u64) + 'static>>,
}

struct PostedTask {
    id: PostedTaskId,
    task: Box<dyn FnOnce() + 'static>,
}

struct RuntimeInner {
    frame_callbacks: RefCell<VecDeque<FrameCallbackEntry>>,
    next_frame_callback_id: Cell<u64>,
    posted_tasks: RefCell<VecDeque<PostedTask>>,
    next_posted_task_id: Cell<u64>,
    needs_frame: Cell<bool>,
}

impl RuntimeInner {
    fn new() -> Self {
        Self {
            frame_callbacks: RefCell::new(VecDeque::new()),
            next_frame_callback_id: Cell::new(1),
            posted_tasks: RefCell::new(VecDeque::new()),
            next_posted_task_id: Cell::new(1),
            needs_frame: Cell::new(false),
        }
    }

    fn register_frame_callback(&self, callback: Box<dyn FnOnce(u64) + 'static>) -> FrameCallbackId {
        let id = self.next_frame_callback_id.get();
        self.next_frame_callback_id.set(id + 1);
        self.frame_callbacks
            .borrow_mut()
            .push_back(FrameCallbackEntry {
                id,
                callback: Some(callback),
            });
        self.needs_frame.set(true);
        id
    }

    fn cancel_frame_callback(&self, id: FrameCallbackId) {
        let mut callbacks = self.frame_callbacks.borrow_mut();
        if let Some(index) = callbacks.iter().position(|entry| entry.id == id) {
            callbacks.remove(index);
        }
        if callbacks.is_empty() {
            self.needs_frame.set(false);
        }
    }

    fn has_frame_callbacks(&self) -> bool {
        !self.frame_callbacks.borrow().is_empty()
    }

    fn drain_frame_callbacks(&self, frame_time_nanos: u64) -> usize {
        // Callbacks registered while draining belong to the next frame.
        let mut callbacks = self.frame_callbacks.borrow_mut();
        let mut pending: Vec<Box<dyn FnOnce(u64) + 'static>> = Vec::with_capacity(callbacks.len());
        while let Some(mut entry) = callbacks.pop_front() {
            if let Some(callback) = entry.callback.take() {
                pending.push(callback);
            }
        }
        drop(callbacks);
        let count = pending.len();
        for callback in pending {
            callback(frame_time_nanos);
        }
        if !self.has_frame_callbacks() {
            self.needs_frame.set(false);
        }
        count
    }

    fn post(&self, task: Box<dyn FnOnce() + 'static>) -> PostedTaskId {
        let id = self.next_posted_task_id.get();
        self.next_posted_task_id.set(id + 1);
        self.posted_tasks
            .borrow_mut()
            .push_back(PostedTask { id, task });
        id
    }

    fn cancel_posted(&self, id: PostedTaskId) -> bool {
        let mut tasks = self.posted_tasks.borrow_mut();
        match tasks.iter().position(|entry| entry.id == id) {
            Some(index) => {
                tasks.remove(index);
                true
            }
            None => false,
        }
    }

    fn run_posted_tasks(&self) -> usize {
        let pending: Vec<PostedTask> = self.posted_tasks.borrow_mut().drain(..).collect();
        let count = pending.len();
        for entry in pending {
            (entry.task)();
        }
        count
    }

    fn has_posted_tasks(&self) -> bool {
        !self.posted_tasks.borrow().is_empty()
    }
}

/// Owner of the frame and task queues. Dropping it turns every outstanding
/// [`RuntimeHandle`] into a no-op.
pub struct Runtime {
    inner: Rc<RuntimeInner>,
}

impl Runtime {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RuntimeInner::new()),
        }
    }

    pub fn handle(&self) -> RuntimeHandle {
        RuntimeHandle {
            inner: Rc::downgrade(&self.inner),
        }
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone)]
pub struct RuntimeHandle {
    inner: Weak<RuntimeInner>,
}

impl RuntimeHandle {
    pub fn register_frame_callback(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> Option<FrameCallbackId> {
        self.inner
            .upgrade()
            .map(|inner| inner.register_frame_callback(Box::new(callback)))
    }

    pub fn cancel_frame_callback(&self, id: FrameCallbackId) {
        if let Some(inner) = self.inner.upgrade() {
            inner.cancel_frame_callback(id);
        }
    }

    /// Runs every frame callback queued before this call. Returns how many ran.
    pub fn drain_frame_callbacks(&self, frame_time_nanos: u64) -> usize {
        self.inner
            .upgrade()
            .map(|inner| inner.drain_frame_callbacks(frame_time_nanos))
            .unwrap_or(0)
    }

    pub fn has_frame_callbacks(&self) -> bool {
        self.inner
            .upgrade()
            .map(|inner| inner.has_frame_callbacks())
            .unwrap_or(false)
    }

    pub fn needs_frame(&self) -> bool {
        self.inner
            .upgrade()
            .map(|inner| inner.needs_frame.get())
            .unwrap_or(false)
    }

    /// Queues `task` to run once the current event/layout pass has finished.
    pub fn post(&self, task: impl FnOnce() + 'static) -> Option<PostedTaskId> {
        self.inner.upgrade().map(|inner| inner.post(Box::new(task)))
    }

    pub fn cancel_posted(&self, id: PostedTaskId) -> bool {
        self.inner
            .upgrade()
            .map(|inner| inner.cancel_posted(id))
            .unwrap_or(false)
    }

    /// Runs every task posted before this call. Tasks posted by those tasks
    /// wait for the next call.
    pub fn run_posted_tasks(&self) -> usize {
        self.inner
            .upgrade()
            .map(|inner| inner.run_posted_tasks())
            .unwrap_or(0)
    }

    pub fn has_posted_tasks(&self) -> bool {
        self.inner
            .upgrade()
            .map(|inner| inner.has_posted_tasks())
            .unwrap_or(false)
    }

    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }

    pub fn frame_clock(&self) -> FrameClock {
        FrameClock::new(self.clone())
    }
}
