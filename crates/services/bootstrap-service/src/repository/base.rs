//! Generic building blocks shared by the repositories.

use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, Condition, ConnectionTrait, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter,
};

use common::AppResult;
use domain::Ensured;

/// Find the row matching `lookup`, or insert `model` when there is none.
///
/// An existing row is returned as found; `model` is only used on insert.
pub async fn get_or_create<C, E, A>(
    db: &C,
    lookup: Condition,
    model: A,
) -> AppResult<Ensured<E::Model>>
where
    C: ConnectionTrait,
    E: EntityTrait,
    A: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send,
    E::Model: IntoActiveModel<A>,
{
    if let Some(existing) = E::find().filter(lookup).one(db).await? {
        return Ok(Ensured::existing(existing));
    }

    let created = model.insert(db).await?;
    Ok(Ensured::created(created))
}

/// Count the rows of an entity matching `filter`.
pub async fn count_where<C, E>(db: &C, filter: Condition) -> AppResult<u64>
where
    C: ConnectionTrait,
    E: EntityTrait,
    E::Model: Sync,
{
    let count = E::find().filter(filter).count(db).await?;
    Ok(count)
}
