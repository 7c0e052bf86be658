// SPDX-License-Identifier: MPL-2.0
//! Effect executor for the viewer.
//!
//! Runs on a tokio runtime (current-thread is enough). Loads and page
//! fetches are spawned tasks that report back exactly once through an
//! unbounded channel; a send to a closed channel is ignored, so a result
//! may safely arrive after the viewer was torn down.
//!
//! While a gesture animation runs, [`ViewerRuntime::step`] samples it once
//! per frame. A committed swipe's dismissal waits on the exit animation's
//! completion signal, never on a timer of its own.

use super::{Effect, Message, PointerInput, Viewer};
use crate::animation::AnimationCompletion;
use crate::application::port::{Dismissal, ImageLoader, Notice, Notifier, PageSource, RenderSurface};
use crate::domain::navigation::{ContextEdge, PageCursor};
use crate::gesture::HostResponse;
use crate::media::prefetch::LoadRequest;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Animation sampling period while a gesture animation runs.
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Drives a [`Viewer`] against its collaborators.
pub struct ViewerRuntime<S, D> {
    viewer: Viewer,
    loader: Arc<dyn ImageLoader>,
    pages: Option<Arc<dyn PageSource>>,
    notifier: Option<Box<dyn Notifier>>,
    surface: S,
    dismissal: D,
    sender: UnboundedSender<Message>,
    receiver: UnboundedReceiver<Message>,
    torn_down: bool,
}

impl<S, D> ViewerRuntime<S, D>
where
    S: RenderSurface,
    D: Dismissal,
{
    pub fn new(viewer: Viewer, loader: Arc<dyn ImageLoader>, surface: S, dismissal: D) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            viewer,
            loader,
            pages: None,
            notifier: None,
            surface,
            dismissal,
            sender,
            receiver,
            torn_down: false,
        }
    }

    /// Enables paging at the ends of the context. Without a page source,
    /// page cursors are ignored.
    #[must_use]
    pub fn with_page_source(mut self, pages: Arc<dyn PageSource>) -> Self {
        self.pages = Some(pages);
        self
    }

    /// Routes notices to the host. Without a notifier they are only logged.
    #[must_use]
    pub fn with_notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Some(Box::new(notifier));
        self
    }

    /// Sender for messages produced outside the runtime, such as the
    /// carousel's slide changes.
    #[must_use]
    pub fn sender(&self) -> UnboundedSender<Message> {
        self.sender.clone()
    }

    /// Applies a message and executes the resulting effects.
    ///
    /// Must be called from within a tokio runtime.
    pub fn dispatch(&mut self, message: Message) {
        let effects = self.viewer.update(message);
        self.execute(effects);
    }

    /// Feeds pointer input to the viewer's dismissal gesture.
    pub fn pointer(&mut self, input: PointerInput, now: Instant) -> HostResponse {
        let (response, effects) = self.viewer.pointer(input, now);
        self.execute(effects);
        response
    }

    /// Cancels a swipe in progress, e.g. when entering fullscreen.
    pub fn external_cancel(&mut self, now: Instant) -> HostResponse {
        let (response, effects) = self.viewer.external_cancel(now);
        self.execute(effects);
        response
    }

    /// Advances the gesture animations to `now`.
    pub fn tick(&mut self, now: Instant) {
        if let Some(kind) = self.viewer.tick(now) {
            tracing::trace!(?kind, "gesture animation finished");
        }
    }

    /// Waits for the next message and dispatches it, sampling the gesture
    /// animation meanwhile if one runs. Returns `false` once the viewer has
    /// been torn down.
    pub async fn step(&mut self) -> bool {
        if self.torn_down {
            return false;
        }

        if self.viewer.gesture().is_animating() {
            tokio::select! {
                message = self.receiver.recv() => self.handle(message),
                () = tokio::time::sleep(FRAME_INTERVAL) => {
                    self.tick(tokio::time::Instant::now().into_std());
                    true
                }
            }
        } else {
            let message = self.receiver.recv().await;
            self.handle(message)
        }
    }

    /// Dispatches every message already queued, without waiting.
    pub fn drain(&mut self) -> usize {
        let mut handled = 0;
        while !self.torn_down {
            let Ok(message) = self.receiver.try_recv() else {
                break;
            };
            self.dispatch(message);
            handled += 1;
        }
        handled
    }

    /// Processes messages until the viewer is dismissed.
    pub async fn run(&mut self) {
        while self.step().await {}
    }

    fn handle(&mut self, message: Option<Message>) -> bool {
        match message {
            Some(message) => {
                self.dispatch(message);
                !self.torn_down
            }
            None => false,
        }
    }

    fn execute(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Load(request) => self.spawn_load(request),
                Effect::FetchPage {
                    edge,
                    cursor,
                    generation,
                } => self.spawn_page_fetch(edge, cursor, generation),
                Effect::Render(window) => self.surface.render_window(&window),
                Effect::Dismiss { after } => {
                    let exit = self.viewer.take_exit_completion();
                    self.schedule_dismissal(exit, after);
                }
                Effect::Notify(notice) => self.notify(&notice),
                Effect::Teardown => {
                    self.dismissal.dismiss();
                    self.torn_down = true;
                }
            }
        }
    }

    fn spawn_load(&self, request: LoadRequest) {
        let loader = Arc::clone(&self.loader);
        let sender = self.sender.clone();
        tokio::spawn(async move {
            if !request.delay.is_zero() {
                tokio::time::sleep(request.delay).await;
            }
            let result = loader.load(&request.id).await;
            let _ = sender.send(Message::ImageLoaded {
                id: request.id,
                result,
            });
        });
    }

    fn spawn_page_fetch(&self, edge: ContextEdge, cursor: PageCursor, generation: u64) {
        let Some(pages) = self.pages.as_ref().map(Arc::clone) else {
            // The edge stays marked in flight, so this is not retried until
            // the context is replaced.
            tracing::debug!(?edge, "no page source configured, paging skipped");
            return;
        };

        let sender = self.sender.clone();
        tokio::spawn(async move {
            let result = pages.fetch_page(cursor).await;
            let _ = sender.send(Message::PageLoaded {
                edge,
                generation,
                result,
            });
        });
    }

    fn schedule_dismissal(&self, exit: Option<AnimationCompletion>, after: Duration) {
        let sender = self.sender.clone();
        tokio::spawn(async move {
            if let Some(exit) = exit {
                // Finished, superseded or dropped: the content no longer moves.
                let outcome = exit.await;
                tracing::trace!(?outcome, "exit animation settled");
            }
            if !after.is_zero() {
                tokio::time::sleep(after).await;
            }
            let _ = sender.send(Message::DismissDue);
        });
    }

    fn notify(&mut self, notice: &Notice) {
        match self.notifier.as_mut() {
            Some(notifier) => notifier.notify(notice),
            None => tracing::debug!(?notice, "no notifier configured"),
        }
    }

    #[must_use]
    pub fn viewer(&self) -> &Viewer {
        &self.viewer
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    #[must_use]
    pub fn dismissal(&self) -> &D {
        &self.dismissal
    }

    #[must_use]
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::AnimationConfig;
    use crate::application::port::Page;
    use crate::domain::navigation::{ImageResource, ItemId, NavigationContextItem};
    use crate::error::LoadFailure;
    use crate::gesture::{GestureOutcome, PointerId};
    use crate::media::window::VisibleWindow;
    use crate::viewer::{ViewerConfig, ViewerStatus};
    use futures_util::future::{BoxFuture, FutureExt};
    use iced_core::Point;
    use std::cell::RefCell;
    use std::collections::HashSet;
    use std::rc::Rc;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingLoader {
        calls: Mutex<Vec<ItemId>>,
        missing: HashSet<ItemId>,
    }

    impl ImageLoader for RecordingLoader {
        fn load(&self, id: &ItemId) -> BoxFuture<'static, Result<ImageResource, LoadFailure>> {
            self.calls.lock().unwrap().push(id.clone());
            let id = id.clone();
            let missing = self.missing.contains(&id);
            async move {
                if missing {
                    Err(LoadFailure::new(id, "404"))
                } else {
                    Ok(ImageResource::new(id.clone(), format!("full/{id}"), 800, 600))
                }
            }
            .boxed()
        }
    }

    struct OnePage;

    impl PageSource for OnePage {
        fn fetch_page(&self, _cursor: PageCursor) -> BoxFuture<'static, Result<Page, LoadFailure>> {
            async {
                Ok(Page {
                    items: vec![
                        NavigationContextItem::new("D", "t/D"),
                        NavigationContextItem::new("E", "t/E"),
                    ],
                    next_cursor: None,
                })
            }
            .boxed()
        }
    }

    #[derive(Default)]
    struct Surface {
        renders: Vec<VisibleWindow>,
    }

    impl RenderSurface for Surface {
        fn render_window(&mut self, window: &VisibleWindow) {
            self.renders.push(window.clone());
        }
    }

    #[derive(Default)]
    struct Teardown {
        calls: usize,
    }

    impl Dismissal for Teardown {
        fn dismiss(&mut self) {
            self.calls += 1;
        }
    }

    #[derive(Clone, Default)]
    struct Notices(Rc<RefCell<Vec<String>>>);

    impl Notifier for Notices {
        fn load_failed(&mut self, failure: &LoadFailure, active: bool, message_key: &str) {
            self.0
                .borrow_mut()
                .push(format!("{message_key}:{}:{active}", failure.id));
        }

        fn page_fetch_failed(&mut self, _edge: ContextEdge, _failure: &LoadFailure, message_key: &str) {
            self.0.borrow_mut().push(message_key.to_string());
        }

        fn load_recovered(&mut self, id: &ItemId) {
            self.0.borrow_mut().push(format!("recovered:{id}"));
        }
    }

    fn context(ids: &[&str]) -> Vec<NavigationContextItem> {
        ids.iter()
            .map(|id| NavigationContextItem::new(*id, format!("t/{id}")))
            .collect()
    }

    fn runtime(loader: Arc<RecordingLoader>) -> ViewerRuntime<Surface, Teardown> {
        runtime_with(ViewerConfig::default(), loader)
    }

    fn runtime_with(config: ViewerConfig, loader: Arc<RecordingLoader>) -> ViewerRuntime<Surface, Teardown> {
        ViewerRuntime::new(
            Viewer::new(config),
            loader,
            Surface::default(),
            Teardown::default(),
        )
    }

    /// Pulls the viewer down far enough to commit, on the paused clock.
    fn commit_swipe(runtime: &mut ViewerRuntime<Surface, Teardown>, now: Instant) {
        let finger = PointerId(1);
        runtime.pointer(
            PointerInput::Down {
                pointer: finger,
                position: Point::new(50.0, 50.0),
                scroll_chain: Vec::new(),
            },
            now,
        );
        runtime.pointer(
            PointerInput::Move {
                pointer: finger,
                position: Point::new(50.0, 200.0),
            },
            now,
        );
        let response = runtime.pointer(PointerInput::Up { pointer: finger }, now);
        assert!(matches!(response.outcome, Some(GestureOutcome::Commit(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn loads_active_item_first_and_renders_resolved_window() {
        let loader = Arc::new(RecordingLoader::default());
        let mut runtime = runtime(Arc::clone(&loader));

        runtime.dispatch(Message::SetContext(context(&["A", "B", "C"])));
        runtime.dispatch(Message::ActiveChanged(ItemId::from("B")));
        while runtime.viewer().store().loaded_count() < 3 {
            assert!(runtime.step().await);
        }

        let calls = loader.calls.lock().unwrap().clone();
        assert_eq!(calls[0], ItemId::from("B"));
        assert_eq!(calls.len(), 3);

        let last = runtime.surface().renders.last().expect("rendered");
        assert_eq!(last.len(), 3);
        assert!(last.items.iter().all(|item| item.is_loaded()));
    }

    #[tokio::test(start_paused = true)]
    async fn failed_active_load_sets_status_and_notifies() {
        let loader = Arc::new(RecordingLoader {
            missing: HashSet::from([ItemId::from("A")]),
            ..Default::default()
        });
        let notices = Notices::default();
        let mut runtime = runtime(loader).with_notifier(notices.clone());

        runtime.dispatch(Message::SetContext(context(&["A"])));
        runtime.dispatch(Message::ActiveChanged(ItemId::from("A")));
        assert!(runtime.step().await);

        assert_eq!(
            *runtime.viewer().status(),
            ViewerStatus::LoadFailed {
                id: ItemId::from("A")
            }
        );
        assert_eq!(
            *notices.0.borrow(),
            vec!["notification-load-error-probably-deleted:A:true".to_string()]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn near_end_page_is_fetched_and_merged() {
        let loader = Arc::new(RecordingLoader::default());
        let mut runtime = runtime(loader).with_page_source(Arc::new(OnePage));

        runtime.dispatch(Message::SetContext(context(&["A", "B", "C"])));
        runtime.dispatch(Message::SetPageCursor {
            edge: ContextEdge::End,
            cursor: Some(PageCursor::from("next")),
        });
        runtime.dispatch(Message::ActiveChanged(ItemId::from("C")));
        while runtime.viewer().store().len() < 5 {
            assert!(runtime.step().await);
        }

        let ids: Vec<_> = runtime
            .viewer()
            .store()
            .iter()
            .map(|item| item.id.as_str().to_string())
            .collect();
        assert_eq!(ids, vec!["A", "B", "C", "D", "E"]);
    }

    #[tokio::test(start_paused = true)]
    async fn cursor_without_page_source_is_ignored_quietly() {
        let loader = Arc::new(RecordingLoader::default());
        let notices = Notices::default();
        let mut runtime = runtime(Arc::clone(&loader)).with_notifier(notices.clone());

        runtime.dispatch(Message::SetContext(context(&["A", "B"])));
        runtime.dispatch(Message::SetPageCursor {
            edge: ContextEdge::End,
            cursor: Some(PageCursor::from("next")),
        });
        runtime.dispatch(Message::ActiveChanged(ItemId::from("B")));
        runtime.dispatch(Message::ActiveChanged(ItemId::from("A")));
        runtime.dispatch(Message::ActiveChanged(ItemId::from("B")));
        while runtime.viewer().store().loaded_count() < 2 {
            assert!(runtime.step().await);
        }

        assert!(notices.0.borrow().is_empty());
        assert_eq!(runtime.viewer().store().len(), 2);
        assert!(loader
            .calls
            .lock()
            .unwrap()
            .iter()
            .all(|id| id.as_str() != "next"));
        assert_eq!(runtime.drain(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn committed_swipe_is_dismissed_after_exit_animation_and_delay() {
        let config = ViewerConfig {
            animation: AnimationConfig::new(Duration::from_millis(1000), Duration::from_millis(200)),
            ..ViewerConfig::default()
        };
        let mut runtime = runtime_with(config, Arc::new(RecordingLoader::default()));
        runtime.dispatch(Message::SetContext(context(&["A"])));

        let start = tokio::time::Instant::now();
        commit_swipe(&mut runtime, start.into_std());
        assert!(runtime.viewer().gesture().is_animating());

        runtime.run().await;

        let elapsed = start.elapsed();
        assert!(
            elapsed >= Duration::from_millis(1000 + 300),
            "torn down after {elapsed:?}"
        );
        assert!(!runtime.viewer().gesture().is_animating());
        assert_eq!(runtime.dismissal().calls, 1);
        assert!(runtime.is_torn_down());
        assert!(!runtime.step().await);
    }

    #[tokio::test(start_paused = true)]
    async fn external_cancel_snaps_back_on_sampled_frames() {
        let mut runtime = runtime(Arc::new(RecordingLoader::default()));
        runtime.dispatch(Message::SetContext(context(&["A"])));

        let now = tokio::time::Instant::now().into_std();
        let finger = PointerId(2);
        runtime.pointer(
            PointerInput::Down {
                pointer: finger,
                position: Point::new(10.0, 10.0),
                scroll_chain: Vec::new(),
            },
            now,
        );
        runtime.pointer(
            PointerInput::Move {
                pointer: finger,
                position: Point::new(10.0, 210.0),
            },
            now,
        );

        let response = runtime.external_cancel(now);
        assert_eq!(response.outcome, Some(GestureOutcome::Cancel));

        while runtime.viewer().gesture().is_animating() {
            assert!(runtime.step().await);
        }
        assert!(runtime.viewer().transform(tokio::time::Instant::now().into_std()).is_identity());
        assert_eq!(runtime.dismissal().calls, 0);
        assert!(!runtime.is_torn_down());
    }

    #[tokio::test(start_paused = true)]
    async fn results_after_teardown_are_ignored() {
        let loader = Arc::new(RecordingLoader::default());
        let mut runtime = runtime(loader);
        runtime.dispatch(Message::SetContext(context(&["A", "B"])));
        runtime.dispatch(Message::ActiveChanged(ItemId::from("A")));
        runtime.dispatch(Message::Close);

        runtime.run().await;
        let renders = runtime.surface().renders.len();
        assert_eq!(runtime.dismissal().calls, 1);
        assert_eq!(runtime.drain(), 0);
        assert_eq!(runtime.surface().renders.len(), renders);
    }
}
