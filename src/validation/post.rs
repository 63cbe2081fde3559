use crate::errno::{self, DomainError};
use crate::models::post::{CreatePostRequest, DeletePostRequest, GetPostRequest, UpdatePostRequest};
use crate::store::Store;

use super::Validator;

fn require(value: &str, message: &'static str) -> Result<(), DomainError> {
    if value.is_empty() {
        return Err(errno::INVALID_ARGUMENT.with_message(message));
    }
    Ok(())
}

fn require_post_id(post_id: &str) -> Result<(), DomainError> {
    require(post_id, "postID cannot be empty")
}

impl<S: Store> Validator<S> {
    pub fn validate_create_post_request(&self, rq: &CreatePostRequest) -> Result<(), DomainError> {
        require(&rq.title, "title cannot be empty")?;
        require(&rq.content, "content cannot be empty")
    }

    pub fn validate_update_post_request(&self, rq: &UpdatePostRequest) -> Result<(), DomainError> {
        require_post_id(&rq.post_id)?;
        if let Some(title) = &rq.title {
            require(title, "title cannot be empty")?;
        }
        if let Some(content) = &rq.content {
            require(content, "content cannot be empty")?;
        }
        Ok(())
    }

    pub fn validate_get_post_request(&self, rq: &GetPostRequest) -> Result<(), DomainError> {
        require_post_id(&rq.post_id)
    }

    pub fn validate_delete_post_request(&self, rq: &DeletePostRequest) -> Result<(), DomainError> {
        if rq.post_ids.is_empty() {
            return Err(errno::INVALID_ARGUMENT.with_message("postIDs cannot be empty"));
        }
        rq.post_ids.iter().try_for_each(|id| require_post_id(id))
    }
}
