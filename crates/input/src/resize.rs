/// Callback invoked with the owner's context and the new framebuffer size.
pub type ResizeCallback<C> = fn(&mut C, u32, u32);

/// Resize notification slot.
///
/// The window stores the callback; whoever owns the camera (or any other
/// context `C`) hands itself in when the resize is dispatched.
pub struct ResizeDispatch<C> {
    callback: Option<ResizeCallback<C>>,
}

impl<C> Default for ResizeDispatch<C> {
    fn default() -> Self {
        Self { callback: None }
    }
}

impl<C> ResizeDispatch<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the callback, replacing any previous one.
    pub fn on_resize(&mut self, callback: ResizeCallback<C>) {
        self.callback = Some(callback);
    }

    /// Notify the registered callback. Zero-sized framebuffers (minimized
    /// windows) are not forwarded.
    pub fn dispatch(&self, context: &mut C, width: u32, height: u32) {
        if width == 0 || height == 0 {
            tracing::trace!(width, height, "skipping resize to empty framebuffer");
            return;
        }
        if let Some(callback) = self.callback {
            callback(context, width, height);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Viewport {
        width: u32,
        height: u32,
        calls: usize,
    }

    fn record(viewport: &mut Viewport, width: u32, height: u32) {
        viewport.width = width;
        viewport.height = height;
        viewport.calls += 1;
    }

    #[test]
    fn dispatch_without_callback_is_noop() {
        let dispatch = ResizeDispatch::<Viewport>::new();
        let mut viewport = Viewport::default();
        dispatch.dispatch(&mut viewport, 640, 480);
        assert_eq!(viewport.calls, 0);
    }

    #[test]
    fn dispatch_passes_context_and_size() {
        let mut dispatch = ResizeDispatch::<Viewport>::new();
        dispatch.on_resize(record);
        let mut viewport = Viewport::default();
        dispatch.dispatch(&mut viewport, 1024, 768);
        assert_eq!((viewport.width, viewport.height, viewport.calls), (1024, 768, 1));
    }

    #[test]
    fn empty_framebuffer_is_skipped() {
        let mut dispatch = ResizeDispatch::<Viewport>::new();
        dispatch.on_resize(record);
        let mut viewport = Viewport::default();
        dispatch.dispatch(&mut viewport, 0, 768);
        assert_eq!(viewport.calls, 0);
    }
}
