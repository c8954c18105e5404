//! Binary cache for compiled models using postcard.

use crate::grammar::GrammarError;

use super::GrammarModel;

impl GrammarModel {
    /// Deserialize a model written by [`GrammarModel::to_binary`].
    pub fn from_binary(bytes: &[u8]) -> Result<Self, GrammarError> {
        postcard::from_bytes(bytes).map_err(GrammarError::Binary)
    }

    /// Serialize the model so a host can skip recompilation.
    pub fn to_binary(&self) -> Vec<u8> {
        postcard::to_allocvec(self).expect("serialization should not fail")
    }
}
