//! Notification inbox endpoints

use reqwest::Method;
use tracing::info;
use crate::models::notification::{Notification, NotificationPage, NotificationQuery};
use crate::services::api::ApiClient;
use crate::utils::errors::Result;

#[derive(Clone, Debug)]
pub struct NotificationService {
    api: ApiClient,
}

impl NotificationService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// `GET /notifications`, newest first, strictly after the cursor when given
    pub async fn get_notifications(&self, query: &NotificationQuery) -> Result<Vec<Notification>> {
        let path = "notifications";
        let builder = self.api.request(Method::GET, path)?.query(&query.to_query());
        let page: NotificationPage = self.api.send_json(builder, path).await?;
        Ok(page.data)
    }

    /// Mark every notification of the current user as read
    pub async fn dismiss_all_notifications(&self) -> Result<()> {
        let path = "notifications/dismiss-all";
        let builder = self.api.request(Method::PATCH, path)?;
        self.api.send_empty(builder, path).await?;
        info!("All notifications dismissed");
        Ok(())
    }
}
