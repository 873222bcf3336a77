//! Read-only access to the Honeycomb boards and queries APIs.

mod client;
mod model;

pub use client::{HoneycombClient, API_KEY_HEADER, DEFAULT_API_URL};
pub use model::{
    Board, BoardLinks, BoardQuery, Calculation, Filter, GraphSettings, Having, Order, Query,
    QueryAnnotation,
};

use crate::Error;

/// Source of the board, query and query annotation records that a board
/// template is assembled from.
pub trait BoardReader {
    /// Fetch the board with the given ID.
    fn board(&self, board_id: &str) -> Result<Board, Error>;

    /// Fetch a query from the given dataset.
    fn query(&self, dataset: &str, query_id: &str) -> Result<Query, Error>;

    /// Fetch a query annotation from the given dataset.
    fn query_annotation(&self, dataset: &str, annotation_id: &str)
        -> Result<QueryAnnotation, Error>;
}

impl<R: BoardReader + ?Sized> BoardReader for &R {
    fn board(&self, board_id: &str) -> Result<Board, Error> {
        (**self).board(board_id)
    }

    fn query(&self, dataset: &str, query_id: &str) -> Result<Query, Error> {
        (**self).query(dataset, query_id)
    }

    fn query_annotation(
        &self,
        dataset: &str,
        annotation_id: &str,
    ) -> Result<QueryAnnotation, Error> {
        (**self).query_annotation(dataset, annotation_id)
    }
}
