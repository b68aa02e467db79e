use tracing::{debug, warn};

pub const CHANNEL_ID: &str = "channel_id";
pub const CHANNEL_NAME: &str = "notification";
pub const NOTIFICATION_ID: i32 = 1;
pub const TITLE: &str = "New Messages";
pub const BODY: &str = "Don't forget to check your new messages!";

#[derive(Clone, Copy, Debug, PartialEq, Eq, uniffi::Enum)]
pub enum NoticeImportance {
    Default,
    High,
}

/// The reminder shown when the app goes to the background. The host turns
/// it into a platform notification that reopens the app when tapped.
#[derive(Clone, Debug, PartialEq, Eq, uniffi::Record)]
pub struct BackgroundNotice {
    pub channel_id: String,
    pub channel_name: String,
    pub importance: NoticeImportance,
    pub notification_id: i32,
    pub title: String,
    pub body: String,
    pub auto_cancel: bool,
    pub reopen_app_on_tap: bool,
}

pub fn background_notice() -> BackgroundNotice {
    BackgroundNotice {
        channel_id: CHANNEL_ID.to_string(),
        channel_name: CHANNEL_NAME.to_string(),
        importance: NoticeImportance::High,
        notification_id: NOTIFICATION_ID,
        title: TITLE.to_string(),
        body: BODY.to_string(),
        auto_cancel: true,
        reopen_app_on_tap: true,
    }
}

/// Implemented by the host; returns whether the notice was posted.
#[uniffi::export(callback_interface)]
pub trait NoticeSink: Send + Sync {
    fn post_notice(&self, notice: BackgroundNotice) -> bool;
}

/// Hands the notice to `sink`. Delivery failure is logged and otherwise
/// ignored.
pub fn notify_backgrounded(sink: &dyn NoticeSink) {
    if sink.post_notice(background_notice()) {
        debug!("Background notice posted");
    } else {
        warn!("Host did not post the background notice");
    }
}
