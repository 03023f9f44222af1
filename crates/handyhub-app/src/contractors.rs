//! Contractor listings, with reviews as a dependent sub-resource.

use handyhub_core::{
  api::ResourceApi,
  contractor::Contractor,
  review::{NewReview, Review},
};

use crate::{error::HookError, resource::ResourceHook};

pub type ContractorsHook<A> = ResourceHook<Contractor, A>;

impl<A: ResourceApi> ResourceHook<Contractor, A> {
  /// Post a review and refresh the reviewed contractor, whose rating and
  /// review count are recomputed by the server.
  pub async fn add_review(&self, review: &NewReview) -> Result<Review, HookError> {
    self
      .create_dependent_and_refetch_parent::<Review>(&review.contractor_id, review)
      .await
  }
}
