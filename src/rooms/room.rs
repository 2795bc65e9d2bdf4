use axum::{debug_handler, extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::{
    db::{
        amenities::{self, Amenity},
        rooms::{self, Category, CategoryKind, NewRoom, Room, RoomKind},
        users::{self, User},
    },
    extract::{AppJson, AppPath},
    session::CurrentUser,
    validate_name, AppError, AppResult, AppState,
};

#[derive(Debug, Serialize)]
pub struct RoomDetail {
    pub pk: i64,
    pub name: String,
    pub country: String,
    pub city: String,
    pub price: i64,
    pub address: String,
    pub kind: RoomKind,
    pub pet_friendly: bool,
    pub owner: User,
    pub category: Option<Category>,
    pub amenities: Vec<Amenity>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RoomCreate {
    name: String,
    country: String,
    city: String,
    price: i64,
    #[serde(default)]
    address: String,
    #[serde(default = "default_pet_friendly")]
    pet_friendly: bool,
    kind: RoomKind,
    category: Option<i64>,
    #[serde(default)]
    amenities: Vec<i64>,
}

fn default_pet_friendly() -> bool {
    true
}

async fn room_detail(db_pool: &SqlitePool, room: Room) -> AppResult<RoomDetail> {
    let owner = users::get(db_pool, room.owner_id)
        .await?
        .ok_or(format!("room {} has no owner {}", room.id, room.owner_id))?;

    let category = match room.category_id {
        Some(category_id) => rooms::category(db_pool, category_id).await?,
        None => None,
    };

    let amenities = rooms::amenities(db_pool, room.id).await?;

    Ok(RoomDetail {
        pk: room.id,
        name: room.name,
        country: room.country,
        city: room.city,
        price: room.price,
        address: room.address,
        kind: room.kind,
        pet_friendly: room.pet_friendly,
        owner,
        category,
        amenities,
    })
}

#[debug_handler]
#[tracing::instrument(skip_all, fields(pk = pk))]
pub(crate) async fn room(
    State(db_pool): State<SqlitePool>,
    AppPath(pk): AppPath<i64>,
) -> AppResult<Json<RoomDetail>> {
    let Some(room) = rooms::get(&db_pool, pk).await? else {
        return Err(AppError::not_found("room", pk));
    };

    Ok(Json(room_detail(&db_pool, room).await?))
}

/// Lists a room owned by the caller, optionally in a category and with amenities.
#[debug_handler(state = AppState)]
#[tracing::instrument(skip_all, fields(user_id = user.id))]
pub(crate) async fn new_room(
    State(db_pool): State<SqlitePool>,
    user: CurrentUser,
    AppJson(payload): AppJson<RoomCreate>,
) -> AppResult<(StatusCode, Json<RoomDetail>)> {
    let name = validate_name(&payload.name)?;
    if payload.price < 0 {
        return Err(AppError::BadRequest("price must not be negative".to_owned()));
    }

    if let Some(category_id) = payload.category {
        match rooms::category(&db_pool, category_id).await? {
            Some(category) if category.kind == CategoryKind::Rooms => {}
            Some(_) => return Err(AppError::BadRequest(format!("category {category_id} is not a room category"))),
            None => return Err(AppError::BadRequest(format!("category {category_id} does not exist"))),
        }
    }

    for &amenity_id in &payload.amenities {
        if amenities::get(&db_pool, amenity_id).await?.is_none() {
            return Err(AppError::BadRequest(format!("amenity {amenity_id} does not exist")));
        }
    }

    let room = rooms::create(
        &db_pool,
        &NewRoom {
            name: name.to_owned(),
            country: payload.country,
            city: payload.city,
            price: payload.price,
            address: payload.address,
            pet_friendly: payload.pet_friendly,
            kind: payload.kind,
            owner_id: user.id,
            category_id: payload.category,
        },
    )
    .await?;

    for &amenity_id in &payload.amenities {
        rooms::add_amenity(&db_pool, room.id, amenity_id).await?;
    }
    tracing::info!(pk = room.id, "@{} listed room {}", user.username, room.name);

    Ok((StatusCode::CREATED, Json(room_detail(&db_pool, room).await?)))
}
