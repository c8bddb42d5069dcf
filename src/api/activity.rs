use super::client::AuthenticatedClient;
use crate::error::SocialResult;
use crate::models::ActivityLogEntry;

/// Activity log of the logged-in user.
#[derive(Debug, Clone, Copy)]
pub struct ActivityApi<'a> {
    client: &'a AuthenticatedClient,
}

impl<'a> ActivityApi<'a> {
    pub(crate) fn new(client: &'a AuthenticatedClient) -> Self {
        Self { client }
    }

    /// GET activity-log
    pub async fn activity_log(&self) -> SocialResult<Vec<ActivityLogEntry>> {
        self.client.get_json("activity.list", "activity-log").await
    }
}
