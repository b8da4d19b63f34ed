use crate::entities::{order, ticket, train, trip};
use chrono::Utc;
use models::booking::BookingError;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DatabaseTransaction,
    DbErr, EntityTrait, ModelTrait, PaginatorTrait, QueryFilter, QueryOrder, SqlErr,
    TransactionTrait,
};
use thiserror::Error;
use uuid::Uuid;

/// A requested place in an order, prior to validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTicket {
    pub cargo: i32,
    pub seat: i32,
    pub trip_id: Uuid,
}

#[derive(Debug, Error)]
pub enum OrderError {
    #[error("An order must contain at least one ticket")]
    EmptyOrder,
    #[error("Trip {0} does not exist")]
    TripNotFound(Uuid),
    #[error(transparent)]
    Booking(#[from] BookingError),
    #[error(transparent)]
    Db(#[from] DbErr),
}

pub struct OrderService;

impl OrderService {
    /// Creates an order and all of its tickets atomically. Every requested
    /// seat is validated against the trip's train and against already sold
    /// tickets; the first failure aborts the whole order and nothing is
    /// persisted.
    pub async fn create_order(
        db: &DatabaseConnection,
        user_id: &str,
        requests: Vec<NewTicket>,
    ) -> Result<(order::Model, Vec<ticket::Model>), OrderError> {
        if requests.is_empty() {
            return Err(OrderError::EmptyOrder);
        }

        let txn = db.begin().await?;

        let placed = order::ActiveModel {
            id: Set(Uuid::new_v4()),
            created_at: Set(Utc::now().fixed_offset()),
            user_id: Set(user_id.to_owned()),
        }
        .insert(&txn)
        .await?;

        let mut tickets = Vec::with_capacity(requests.len());
        for request in requests {
            // An error here drops the transaction, rolling everything back.
            tickets.push(Self::book_seat(&txn, placed.id, request).await?);
        }

        txn.commit().await?;
        Ok((placed, tickets))
    }

    async fn book_seat(
        txn: &DatabaseTransaction,
        order_id: Uuid,
        request: NewTicket,
    ) -> Result<ticket::Model, OrderError> {
        let trip = trip::Entity::find_by_id(request.trip_id)
            .one(txn)
            .await?
            .ok_or(OrderError::TripNotFound(request.trip_id))?;
        let train = train::Entity::find_by_id(trip.train_id)
            .one(txn)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("train {}", trip.train_id)))?;

        train.seat_plan().validate(request.cargo, request.seat)?;

        let already_sold = ticket::Entity::find()
            .filter(ticket::Column::TripId.eq(request.trip_id))
            .filter(ticket::Column::Cargo.eq(request.cargo))
            .filter(ticket::Column::Seat.eq(request.seat))
            .count(txn)
            .await?;
        if already_sold > 0 {
            return Err(BookingError::SeatTaken {
                cargo: request.cargo,
                seat: request.seat,
            }
            .into());
        }

        let inserted = ticket::ActiveModel {
            id: Set(Uuid::new_v4()),
            cargo: Set(request.cargo),
            seat: Set(request.seat),
            trip_id: Set(request.trip_id),
            order_id: Set(order_id),
        }
        .insert(txn)
        .await;

        match inserted {
            Ok(model) => Ok(model),
            // A racing order can commit between the existence check above and
            // this insert; the unique index on (trip_id, cargo, seat) is the
            // authoritative guard and its violation surfaces as the same
            // conflict the check would have produced.
            Err(err) => match err.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => Err(BookingError::SeatTaken {
                    cargo: request.cargo,
                    seat: request.seat,
                }
                .into()),
                _ => Err(err.into()),
            },
        }
    }

    /// All orders placed by the user, newest first, each with its tickets.
    pub async fn list_for_user(
        db: &DatabaseConnection,
        user_id: &str,
    ) -> Result<Vec<(order::Model, Vec<ticket::Model>)>, DbErr> {
        order::Entity::find()
            .filter(order::Column::UserId.eq(user_id))
            .order_by_desc(order::Column::CreatedAt)
            .find_with_related(ticket::Entity)
            .all(db)
            .await
    }

    /// A single order, only if it belongs to the user.
    pub async fn get_for_user(
        db: &DatabaseConnection,
        user_id: &str,
        id: Uuid,
    ) -> Result<Option<(order::Model, Vec<ticket::Model>)>, DbErr> {
        let Some(found) = order::Entity::find_by_id(id)
            .filter(order::Column::UserId.eq(user_id))
            .one(db)
            .await?
        else {
            return Ok(None);
        };

        let tickets = found
            .find_related(ticket::Entity)
            .order_by_asc(ticket::Column::Cargo)
            .order_by_asc(ticket::Column::Seat)
            .all(db)
            .await?;

        Ok(Some((found, tickets)))
    }

    /// Deletes the user's order; tickets go with it via the cascade.
    /// Returns false when the order does not exist or belongs to someone else.
    pub async fn delete_for_user(
        db: &DatabaseConnection,
        user_id: &str,
        id: Uuid,
    ) -> Result<bool, DbErr> {
        let Some(found) = order::Entity::find_by_id(id)
            .filter(order::Column::UserId.eq(user_id))
            .one(db)
            .await?
        else {
            return Ok(false);
        };

        found.delete(db).await?;
        Ok(true)
    }
}
