use async_graphql::{Context, Result, Subscription};
use futures_util::stream::{self, Stream};

use crate::application::SharedEventBus;

use super::types::UpdateUserPayload;

#[derive(Default)]
pub struct SubscriptionRoot;

#[Subscription]
impl SubscriptionRoot {
    /// Every add, edit and delete, in publication order
    async fn users_updated(
        &self,
        ctx: &Context<'_>,
    ) -> Result<impl Stream<Item = UpdateUserPayload>> {
        let subscriber = ctx.data::<SharedEventBus>()?.subscribe();

        Ok(stream::unfold(subscriber, |mut subscriber| async move {
            let message = subscriber.recv().await?;
            Some((UpdateUserPayload::from(message.event), subscriber))
        }))
    }
}
