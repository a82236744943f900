use utoipa::OpenApi;

pub const HEALTH_TAG: &str = "Health";
pub const NOTIFICATION_TAG: &str = "Notifications";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "LAN Messaging Notifier",
        description = "Centralized notification service for the LAN: send messages to Slack, Telegram and WhatsApp",
    ),
    components(
        schemas(
            crate::api::dto::ErrorResponse,
            crate::services::notifications::Platform,
        )
    ),
    tags(
        (name = HEALTH_TAG, description = "Service status and platform connectivity"),
        (name = NOTIFICATION_TAG, description = "Message fan-out to the enabled platforms"),
    )
)]
pub struct ApiDoc;
