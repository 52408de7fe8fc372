pub(crate) mod etl;
pub(crate) mod migrate;
pub(crate) mod query;
pub(crate) mod serve;
pub(crate) mod stats;
