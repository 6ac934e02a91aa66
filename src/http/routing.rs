use std::borrow::Cow;

use crate::model::id::{ApplicationId, CommandId, MessageId};

/// Generates the [`Route`] enum along with the path each variant resolves to.
///
/// Paths are relative to the configured API base, see [`HttpBuilder::api_base`].
///
/// [`HttpBuilder::api_base`]: super::HttpBuilder::api_base
macro_rules! routes {
    ($lt:lifetime, {
        $(
            $name:ident $({ $($field_name:ident: $field_type:ty),* })?,
            $path:expr;
        )+
    }) => {
        #[derive(Clone, Copy, Debug)]
        #[non_exhaustive]
        pub enum Route<$lt> {
            $(
                $name $({ $($field_name: $field_type),* })?,
            )+
        }

        impl<$lt> Route<$lt> {
            #[must_use]
            pub fn path(self) -> Cow<'static, str> {
                match self {
                    $(
                        Self::$name $({ $($field_name),* })? => $path.into(),
                    )+
                }
            }
        }
    };
}

routes! ('a, {
    Command { application_id: ApplicationId, command_id: CommandId },
    api!("/applications/{}/commands/{}", application_id, command_id);

    Commands { application_id: ApplicationId },
    api!("/applications/{}/commands", application_id);

    WebhookFollowupMessage { application_id: ApplicationId, token: &'a str, message_id: MessageId },
    api!("/webhooks/{}/{}/messages/{}", application_id, token, message_id);

    WebhookFollowupMessages { application_id: ApplicationId, token: &'a str },
    api!("/webhooks/{}/{}", application_id, token);

    WebhookOriginalInteractionResponse { application_id: ApplicationId, token: &'a str },
    api!("/webhooks/{}/{}/messages/@original", application_id, token);
});
