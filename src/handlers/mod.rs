pub mod auth;
pub mod cars;
pub mod currencies;
pub mod expenses;
pub mod fuels;
pub mod mileages;
pub mod orders;
pub mod settings;

use crate::api::ObjectRef;
use crate::database::models::CarOwner;
use crate::database::repository::CarRepository;
use crate::database::DatabaseError;
use crate::error::ApiError;
use crate::middleware::AuthUser;

/// Ownership check applied before any single-record fetch or update. The
/// caller cannot tell a missing row from someone else's row; the log can.
pub(crate) fn check_owner(
    lookup: Result<i64, DatabaseError>,
    user: &AuthUser,
    resource: &'static str,
) -> Result<(), ApiError> {
    match lookup {
        Ok(owner_id) if owner_id == user.id => Ok(()),
        Ok(owner_id) => {
            tracing::warn!(resource, owner_id, user_id = user.id, "ownership mismatch");
            Err(ApiError::invalid_argument(format!("invalid {resource} owner")))
        }
        Err(DatabaseError::NotFound) => {
            tracing::warn!(resource, user_id = user.id, "owner lookup found no record");
            Err(ApiError::invalid_argument(format!("invalid {resource}")))
        }
        Err(err) => Err(ApiError::internal(err)),
    }
}

/// Resolve a submitted foreign reference; an absent row is the caller's
/// mistake, not a server fault.
pub(crate) fn required_reference<T>(
    lookup: Result<T, DatabaseError>,
    what: &'static str,
) -> Result<T, ApiError> {
    match lookup {
        Ok(value) => Ok(value),
        Err(DatabaseError::NotFound) => Err(ApiError::invalid_argument(format!("invalid {what}"))),
        Err(err) => Err(ApiError::internal(err)),
    }
}

/// Resolve a submitted car reference and confirm the caller owns it before
/// it may be attached to another resource. `None` when no car was submitted.
pub(crate) async fn attached_car(
    repo: &CarRepository,
    car: Option<&ObjectRef>,
    user: &AuthUser,
) -> Result<Option<CarOwner>, ApiError> {
    let Some(car_ref) = car.filter(|c| c.id > 0) else {
        return Ok(None);
    };

    let car = required_reference(repo.find(car_ref.id).await, "car")?;
    if car.user_id != user.id {
        tracing::warn!(car_id = car.id, owner_id = car.user_id, user_id = user.id, "ownership mismatch");
        return Err(ApiError::invalid_argument("invalid car owner"));
    }

    Ok(Some(car))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: i64) -> AuthUser {
        AuthUser {
            id,
            username: "marge".into(),
        }
    }

    #[test]
    fn owner_match_passes() {
        assert!(check_owner(Ok(7), &user(7), "fuel").is_ok());
    }

    #[test]
    fn owner_mismatch_is_invalid_argument() {
        let err = check_owner(Ok(7), &user(8), "fuel").unwrap_err();
        assert_eq!(err.error_code(), "INVALID_ARGUMENT");
        assert_eq!(err.message(), "invalid fuel owner");
    }

    #[test]
    fn missing_record_is_invalid_argument_not_not_found() {
        let err = check_owner(Err(DatabaseError::NotFound), &user(7), "order").unwrap_err();
        assert_eq!(err.error_code(), "INVALID_ARGUMENT");
        assert_eq!(err.message(), "invalid order");
    }

    #[test]
    fn backend_failure_stays_internal() {
        let err = check_owner(Err(DatabaseError::Sqlx(sqlx::Error::PoolClosed)), &user(7), "order").unwrap_err();
        assert_eq!(err.error_code(), "INTERNAL");
    }

    #[test]
    fn unresolved_reference_is_invalid_argument() {
        let err = required_reference::<i64>(Err(DatabaseError::NotFound), "currency").unwrap_err();
        assert_eq!(err.error_code(), "INVALID_ARGUMENT");
        assert_eq!(err.message(), "invalid currency");
    }

    #[test]
    fn resolved_reference_passes_through() {
        assert_eq!(required_reference(Ok(5i64), "currency").unwrap(), 5);
    }
}
