use crate::config::MapConfig;
use crate::dispatch::{self, Effects};
use crate::map::{CanvasMap, MapAdapter, MapMarker};
use crate::model::Credentials;
use crate::notify::{Toast, ToastQueue};
use crate::session::{Navigator, Route};
use crate::store::friend::FriendIntent;
use crate::store::map::{ViewportPatch, ViewportState};
use crate::store::quest::QuestIntent;
use crate::store::Store;
use crate::ui::form::{FriendsState, ProfileState, SignInState, SignUpState, TextField};
use crate::upload::{inspect_image, SignUpForm, UploadLimits, ValidationError};
use crate::worker::{ApiCommand, ApiOutcome, RequestSink};

/// Toasts stay for this many ticks.
const TOAST_TTL_TICKS: u32 = 16;
const TOAST_CAPACITY: usize = 4;

/// Fraction of the visible map span moved per arrow key.
const PAN_STEP: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapSettings {
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub default_zoom: f64,
}

impl From<&MapConfig> for MapSettings {
    fn from(config: &MapConfig) -> Self {
        Self {
            min_zoom: config.min_zoom,
            max_zoom: config.max_zoom,
            default_zoom: config.default_zoom,
        }
    }
}

pub struct App {
    should_quit: bool,
    store: Store,
    navigator: Navigator,
    requests: Box<dyn RequestSink>,
    /// Mounted only while the map screen is current.
    map: Option<MapAdapter<CanvasMap>>,
    map_settings: MapSettings,
    limits: UploadLimits,
    toasts: ToastQueue,
    sign_in: SignInState,
    sign_up: SignUpState,
    profile: ProfileState,
    friends: FriendsState,
    quests_scroll: usize,
}

impl App {
    pub fn new(
        store: Store,
        requests: Box<dyn RequestSink>,
        map_settings: MapSettings,
        limits: UploadLimits,
    ) -> Self {
        let start = if store.is_authenticated() {
            Route::Home
        } else {
            Route::SignIn
        };
        let mut app = Self {
            should_quit: false,
            store,
            navigator: Navigator::new(start),
            requests,
            map: None,
            map_settings,
            limits,
            toasts: ToastQueue::new(TOAST_TTL_TICKS, TOAST_CAPACITY),
            sign_in: SignInState::new(),
            sign_up: SignUpState::new(),
            profile: ProfileState::default(),
            friends: FriendsState::default(),
            quests_scroll: 0,
        };
        app.enter_route(None);
        app
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn route(&self) -> Route {
        self.navigator.current()
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn map(&self) -> Option<&CanvasMap> {
        self.map.as_ref().and_then(MapAdapter::widget)
    }

    pub fn is_map_mounted(&self) -> bool {
        self.map.is_some()
    }

    pub fn toasts(&self) -> &ToastQueue {
        &self.toasts
    }

    pub fn sign_in_form(&self) -> &SignInState {
        &self.sign_in
    }

    pub fn sign_up_form(&self) -> &SignUpState {
        &self.sign_up
    }

    pub fn profile_form(&self) -> &ProfileState {
        &self.profile
    }

    pub fn friends_form(&self) -> &FriendsState {
        &self.friends
    }

    pub fn quests_scroll(&self) -> usize {
        self.quests_scroll
    }

    pub fn is_loading(&self) -> bool {
        let state = self.store.state();
        state.user.loading || state.quest.loading || state.friend.loading
    }

    pub fn on_tick(&mut self) {
        self.toasts.on_tick();
    }

    // ---- navigation -------------------------------------------------------

    pub fn navigate(&mut self, route: Route) {
        let before = self.route();
        self.navigator.navigate(route, &self.store.state().user);
        self.after_navigation(before);
    }

    pub fn go_back(&mut self) {
        let before = self.route();
        self.navigator.go_back(&self.store.state().user);
        self.after_navigation(before);
    }

    /// Re-run the guard, e.g. after the session ended.
    fn enforce_guard(&mut self) {
        let before = self.route();
        self.navigator.enforce(&self.store.state().user);
        self.after_navigation(before);
    }

    fn after_navigation(&mut self, before: Route) {
        if self.route() != before {
            tracing::debug!(from = %before, to = %self.route(), "Route changed");
            self.enter_route(Some(before));
        }
    }

    fn enter_route(&mut self, previous: Option<Route>) {
        if previous == Some(Route::Friends) {
            self.store.dispatch(FriendIntent::ClearSelectedUserQuests);
        }
        if self.route() == Route::Home {
            if self.map.is_none() {
                self.mount_map();
            }
        } else {
            self.unmount_map();
        }
        self.load_route();
    }

    fn load_route(&mut self) {
        let Some(user_id) = self.store.state().user.user_id().map(str::to_string) else {
            return;
        };
        match self.route() {
            Route::Home => self.submit(ApiCommand::FetchCurrentQuest { user_id }),
            Route::Profile => {
                self.submit(ApiCommand::FetchCurrentQuest {
                    user_id: user_id.clone(),
                });
                self.submit(ApiCommand::FetchCompletedQuests { user_id });
            }
            Route::Friends => self.submit(ApiCommand::FetchFriends { user_id }),
            Route::Quests => self.submit(ApiCommand::FetchCompletedQuests { user_id }),
            Route::SignIn | Route::SignUp => {}
        }
    }

    // ---- requests ---------------------------------------------------------

    fn submit(&mut self, command: ApiCommand) {
        dispatch::begin(&mut self.store, &command);
        self.requests.submit(self.store.session_epoch(), command);
    }

    /// Apply a finished request.
    pub fn on_api(&mut self, epoch: u64, outcome: ApiOutcome) {
        let completed = matches!(outcome, ApiOutcome::QuestCompleted(Ok(_)));
        let signed_in = matches!(
            outcome,
            ApiOutcome::SignedIn(Ok(_)) | ApiOutcome::SignedUp(Ok(_))
        );

        let effects = dispatch::settle(&mut self.store, epoch, outcome);
        if effects.stale {
            return;
        }
        if completed {
            self.profile.photos.clear();
            self.profile.description.clear();
        }
        if signed_in {
            self.sign_in = SignInState::new();
            self.sign_up = SignUpState::new();
        }
        self.apply_effects(effects);
    }

    fn apply_effects(&mut self, effects: Effects) {
        self.toasts.extend(effects.toasts);
        if effects.forced_logout {
            self.requests.end_session();
            self.enforce_guard();
        }
        if let Some(route) = effects.navigate {
            self.navigate(route);
        }
    }

    pub fn logout(&mut self) {
        if !self.store.is_authenticated() {
            return;
        }
        self.store.logout();
        self.requests.end_session();
        self.toasts.push(Toast::success("Signed out"));
        self.enforce_guard();
    }

    // ---- map --------------------------------------------------------------

    fn mount_map(&mut self) {
        let widget = CanvasMap::new(self.map_settings.min_zoom, self.map_settings.max_zoom);
        self.map = Some(MapAdapter::mount(
            widget,
            self.store.viewport(),
            self.map_settings.default_zoom,
        ));
    }

    fn unmount_map(&mut self) {
        if let Some(mut adapter) = self.map.take() {
            adapter.sync(&mut self.store);
            adapter.unmount();
        }
    }

    /// Push the store's viewport into a fresh widget.
    fn remount_map(&mut self) {
        self.unmount_map();
        if self.route() == Route::Home {
            self.mount_map();
        }
    }

    fn sync_map(&mut self) {
        if let Some(adapter) = self.map.as_mut() {
            adapter.sync(&mut self.store);
        }
    }

    pub fn pan_map(&mut self, dx: f64, dy: f64) {
        if let Some(widget) = self.map.as_mut().and_then(MapAdapter::widget_mut) {
            widget.pan(dx * PAN_STEP, dy * PAN_STEP);
        }
        self.sync_map();
    }

    pub fn zoom_map(&mut self, delta: f64) {
        if let Some(widget) = self.map.as_mut().and_then(MapAdapter::widget_mut) {
            widget.zoom_by(delta);
        }
        self.sync_map();
    }

    pub fn reset_view(&mut self) {
        self.sync_map();
        self.store.reset_position();
        self.remount_map();
    }

    /// Center the map on the current quest.
    pub fn fly_to_quest(&mut self) {
        let Some(coordinates) = self
            .store
            .state()
            .quest
            .current_quest
            .as_ref()
            .map(|quest| quest.coordinates)
        else {
            self.toasts.push(Toast::info("No active quest"));
            return;
        };
        self.sync_map();
        self.store.set_position(ViewportPatch::full(ViewportState::new(
            coordinates.longitude,
            coordinates.latitude,
            coordinates.zoom,
        )));
        self.store.dispatch(QuestIntent::ClosePopup);
        self.remount_map();
    }

    pub fn roll_quest(&mut self) {
        if let Some(user_id) = self.store.state().user.user_id().map(str::to_string) {
            self.submit(ApiCommand::RollQuest { user_id });
        }
    }

    pub fn task_popup_open(&self) -> bool {
        self.store.state().quest.task_popup_open
    }

    pub fn close_task_popup(&mut self) {
        self.store.dispatch(QuestIntent::ClosePopup);
    }

    /// Markers drawn over the map: the current quest, if any.
    pub fn markers(&self) -> Vec<MapMarker> {
        self.store
            .state()
            .quest
            .current_quest
            .iter()
            .map(|quest| MapMarker {
                longitude: quest.coordinates.longitude,
                latitude: quest.coordinates.latitude,
                label: quest.city.clone(),
            })
            .collect()
    }

    // ---- forms ------------------------------------------------------------

    fn focused_field(&mut self) -> Option<&mut TextField> {
        match self.route() {
            Route::SignIn => Some(self.sign_in.focused()),
            Route::SignUp => Some(self.sign_up.focused()),
            Route::Profile => Some(self.profile.focused()),
            Route::Friends => Some(&mut self.friends.username),
            Route::Home | Route::Quests => None,
        }
    }

    pub fn type_char(&mut self, c: char) {
        if let Some(field) = self.focused_field() {
            field.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.focused_field() {
            field.backspace();
        }
    }

    pub fn next_field(&mut self) {
        match self.route() {
            Route::SignIn => self.sign_in.cursor.next(SignInState::FIELDS),
            Route::SignUp => self.sign_up.cursor.next(SignUpState::FIELDS),
            Route::Profile => self.profile.cursor.next(ProfileState::FIELDS),
            _ => {}
        }
    }

    pub fn prev_field(&mut self) {
        match self.route() {
            Route::SignIn => self.sign_in.cursor.prev(SignInState::FIELDS),
            Route::SignUp => self.sign_up.cursor.prev(SignUpState::FIELDS),
            Route::Profile => self.profile.cursor.prev(ProfileState::FIELDS),
            _ => {}
        }
    }

    /// Enter on the current screen.
    pub fn submit_form(&mut self) {
        match self.route() {
            Route::SignIn => self.submit_sign_in(),
            Route::SignUp => {
                if self.sign_up.cursor.index() == SignUpState::AVATAR_FIELD
                    && !self.sign_up.avatar_path.is_empty()
                {
                    self.attach_avatar();
                } else {
                    self.submit_sign_up();
                }
            }
            Route::Profile => match self.profile.cursor.index() {
                ProfileState::PHOTOS_FIELD => self.add_photos(),
                ProfileState::DESCRIPTION_FIELD => self.complete_quest(),
                _ => self.update_avatar(),
            },
            Route::Friends => {
                if self.friends.username.is_empty() {
                    self.show_friend_quests();
                } else {
                    self.add_friend();
                }
            }
            Route::Home | Route::Quests => {}
        }
    }

    fn submit_sign_in(&mut self) {
        let form = &mut self.sign_in;
        let error = if form.username.is_empty() {
            Some(ValidationError::EmptyField { field: "Username" })
        } else if form.password.value().is_empty() {
            Some(ValidationError::EmptyField { field: "Password" })
        } else {
            None
        };
        form.error = error.map(|e| e.to_string());
        if form.error.is_some() {
            return;
        }
        let credentials = Credentials {
            username: form.username.value().trim().to_string(),
            password: form.password.value().to_string(),
        };
        self.submit(ApiCommand::SignIn(credentials));
    }

    /// Validate the typed avatar path as if the file had just been picked.
    fn attach_avatar(&mut self) {
        match inspect_image(self.sign_up.avatar_path.value().trim(), &self.limits) {
            Ok(file) => {
                self.sign_up.error = None;
                self.sign_up.avatar = Some(file);
            }
            Err(err) => {
                self.sign_up.avatar = None;
                self.sign_up.error = Some(err.to_string());
            }
        }
    }

    fn submit_sign_up(&mut self) {
        let form = SignUpForm {
            username: self.sign_up.username.value().to_string(),
            password: self.sign_up.password.value().to_string(),
            confirm_password: self.sign_up.confirm.value().to_string(),
            avatar: self.sign_up.avatar.clone(),
        };
        match form.validate() {
            Ok((credentials, avatar)) => {
                self.sign_up.error = None;
                self.submit(ApiCommand::SignUp {
                    credentials,
                    avatar,
                });
            }
            Err(err) => self.sign_up.error = Some(err.to_string()),
        }
    }

    fn add_photos(&mut self) {
        let paths = self.profile.typed_paths();
        if paths.is_empty() {
            return;
        }
        match self.profile.photos.add_batch(&paths, &self.limits) {
            Ok(added) => {
                self.profile.error = None;
                self.profile.photo_paths.clear();
                tracing::debug!(added, total = self.profile.photos.len(), "Photos attached");
            }
            Err(err) => self.profile.error = Some(err.to_string()),
        }
    }

    pub fn clear_photos(&mut self) {
        self.profile.photos.clear();
        self.profile.error = None;
    }

    fn complete_quest(&mut self) {
        let Some(user_id) = self.store.state().user.user_id().map(str::to_string) else {
            return;
        };
        if self.store.state().quest.current_quest.is_none() {
            self.profile.error = Some("No active quest to complete".to_string());
            return;
        }
        match self.profile.photos.for_submit() {
            Ok(images) => {
                self.profile.error = None;
                let description = self.profile.description.value().to_string();
                self.submit(ApiCommand::CompleteQuest {
                    user_id,
                    images,
                    description,
                });
            }
            Err(err) => self.profile.error = Some(err.to_string()),
        }
    }

    fn update_avatar(&mut self) {
        let Some(user_id) = self.store.state().user.user_id().map(str::to_string) else {
            return;
        };
        if self.profile.avatar_path.is_empty() {
            return;
        }
        match inspect_image(self.profile.avatar_path.value().trim(), &self.limits) {
            Ok(avatar) => {
                self.profile.error = None;
                self.profile.avatar_path.clear();
                self.submit(ApiCommand::UpdateAvatar { user_id, avatar });
            }
            Err(err) => self.profile.error = Some(err.to_string()),
        }
    }

    fn add_friend(&mut self) {
        let Some(user_id) = self.store.state().user.user_id().map(str::to_string) else {
            return;
        };
        let username = self.friends.username.value().trim().to_string();
        self.friends.username.clear();
        self.submit(ApiCommand::AddFriend { user_id, username });
    }

    fn show_friend_quests(&mut self) {
        let friend_id = self
            .store
            .state()
            .friend
            .friends
            .get(self.friends.selected)
            .map(|friend| friend.user_id.clone());
        if let Some(user_id) = friend_id {
            self.submit(ApiCommand::FetchUserQuests { user_id });
        }
    }

    pub fn move_selection(&mut self, delta: isize) {
        match self.route() {
            Route::Friends => {
                let count = self.store.state().friend.friends.len();
                self.friends.selected = step(self.friends.selected, delta, count);
            }
            Route::Quests => {
                let count = self.store.state().quest.completed.len();
                self.quests_scroll = step(self.quests_scroll, delta, count);
            }
            _ => {}
        }
    }

    /// Sync any pending map change and drain persistence before exit.
    pub fn shutdown(&mut self) {
        self.unmount_map();
        self.store.flush();
    }
}

fn step(current: usize, delta: isize, count: usize) -> usize {
    if count == 0 {
        return 0;
    }
    current.saturating_add_signed(delta).min(count - 1)
}
