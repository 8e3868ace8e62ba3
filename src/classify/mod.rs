// Classifier engines — one module per backend plus the routing layer.
//
// fastText and the two ONNX transformer models run locally; the router
// picks a transformer branch from the detected script and applies the
// confidence-floor correction on the English side.

pub mod english;
pub mod fasttext;
pub mod indic;
pub mod router;
