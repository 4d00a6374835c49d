pub(crate) mod comment_repository;
pub(crate) mod post_repository;
pub(crate) mod user_repository;
use std::marker::PhantomData;

use crate::domain::document::Document;

/// An entity kept in one of the document's collections.
pub trait Entity: Sized {
	fn id(&self) -> i64;
	fn collection(document: &Document) -> &Vec<Self>;
	fn collection_mut(document: &mut Document) -> &mut Vec<Self>;
	/// Last id issued for this collection.
	fn sequence(document: &mut Document) -> &mut i64;
}

/// Typed access to one collection of a loaded [`Document`].
pub struct Repository<E: Entity>(PhantomData<E>);

impl<E: Entity> Repository<E> {
	pub fn list(document: &Document) -> &[E] {
		E::collection(document)
	}

	pub fn get(
		document: &Document,
		id: i64,
	) -> Option<&E> {
		E::collection(document).iter().find(|entity| entity.id() == id)
	}

	pub fn get_mut(
		document: &mut Document,
		id: i64,
	) -> Option<&mut E> {
		E::collection_mut(document).iter_mut().find(|entity| entity.id() == id)
	}

	/// Reserves the next id, higher than both the sequence and every id already stored.
	pub fn next_id(document: &mut Document) -> i64 {
		let max_stored = E::collection(document).iter().map(Entity::id).max().unwrap_or(0);
		let sequence = E::sequence(document);
		*sequence = (*sequence).max(max_stored) + 1;
		*sequence
	}

	/// Assigns an id, builds the entity with it and appends it to the collection.
	pub fn add(
		document: &mut Document,
		build: impl FnOnce(i64) -> E,
	) -> &E {
		let id = Self::next_id(document);
		let collection = E::collection_mut(document);
		collection.push(build(id));
		&collection[collection.len() - 1]
	}

	pub fn remove(
		document: &mut Document,
		id: i64,
	) -> Option<E> {
		let collection = E::collection_mut(document);
		let position = collection.iter().position(|entity| entity.id() == id)?;
		Some(collection.remove(position))
	}
}
