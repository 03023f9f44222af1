//! Service requests posted by customers.

use handyhub_core::{
  api::ResourceApi,
  service_request::{RequestStatus, ServiceRequest, ServiceRequestUpdate},
};
use uuid::Uuid;

use crate::{error::HookError, resource::ResourceHook};

pub type ServiceRequestsHook<A> = ResourceHook<ServiceRequest, A>;

impl<A: ResourceApi> ResourceHook<ServiceRequest, A> {
  /// Move a request to `status`, leaving its other fields untouched.
  pub async fn set_status(
    &self,
    request_id: Uuid,
    status: RequestStatus,
  ) -> Result<ServiceRequest, HookError> {
    let update = ServiceRequestUpdate { status: Some(status), ..Default::default() };
    self.update(&request_id, &update).await
  }
}
