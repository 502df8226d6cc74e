// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Each use case orchestrates the lower layers to accomplish
// one user-facing operation.
//
// Rules for this layer:
//   - No tensor maths or model code here (that's Layer 5)
//   - No printing here (that's Layer 1)
//   - No direct file access (that's Layer 4 and 6)
//   - Only workflow coordination and error context
//
// Use cases that touch a model are generic over the Burn
// backend; the CLI picks the concrete backend and device.
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

/// Train a model and persist its checkpoint
pub mod train_use_case;

/// Membership inference against a checkpoint
pub mod attack_use_case;

/// Listing of checkpoints and past attacks
pub mod catalog_use_case;

/// Synthetic corpus generation and corpus listing
pub mod corpus_use_case;
