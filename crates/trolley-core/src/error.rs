//! # Error Types
//!
//! Domain-specific error types for trolley-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  trolley-core errors (this file)                                       │
//! │  └── CartError        - Cart mutation rejections                      │
//! │                                                                         │
//! │  trolley-db errors (separate crate)                                    │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  trolley-store errors (separate crate)                                 │
//! │  └── CatalogError     - Remote lookup failures                         │
//! │                                                                         │
//! │  Flow: CatalogError/DbError → CartError → CartNotifier → Toast         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product id, amounts)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

// =============================================================================
// Cart Error
// =============================================================================

/// Cart mutation errors.
///
/// These are the failure modes the storefront surfaces as one-line toast
/// notifications. None of them are fatal: the cart is always left exactly
/// as it was before the rejected operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// Requested amount or increment exceeds available stock.
    ///
    /// ## When This Occurs
    /// - Adding one more unit when the cart already holds the full stock
    /// - Updating an amount above the oracle's available quantity
    /// - Updating an amount to zero or below
    ///
    /// ## User Workflow
    /// ```text
    /// Add to Cart (product 42)
    ///      │
    ///      ▼
    /// Oracle says: available = 3, cart already holds 3
    ///      │
    ///      ▼
    /// OutOfStock { product_id: 42, available: 3, requested: 4 }
    ///      │
    ///      ▼
    /// UI shows: "requested quantity exceeds stock"
    /// ```
    #[error("requested quantity exceeds stock for product {product_id}: available {available}, requested {requested}")]
    OutOfStock {
        product_id: i64,
        available: i64,
        requested: i64,
    },

    /// The targeted product has no line item in the cart.
    ///
    /// ## When This Occurs
    /// - Removing a product that was never added (or already removed)
    /// - Updating the amount of a product absent from the cart
    #[error("product {product_id} is not in the cart")]
    ProductNotInCart { product_id: i64 },

    /// Line item amount exceeds the hard per-item ceiling.
    ///
    /// Backstop for catalogs that report effectively unlimited stock.
    #[error("amount {requested} exceeds maximum allowed ({max})")]
    AmountTooLarge { requested: i64, max: i64 },

    /// A remote lookup (catalog or stock oracle) failed.
    ///
    /// ## When This Occurs
    /// - Network error reaching the catalog API
    /// - Product or stock record missing upstream
    /// - Malformed response body
    ///
    /// The `operation` names what the user was doing ("add product",
    /// "update product quantity") so the toast reads naturally.
    #[error("failed to {operation}: {reason}")]
    Lookup { operation: String, reason: String },

    /// The durable snapshot write failed after a valid mutation.
    ///
    /// The in-memory cart is rolled back when this happens, so cart and
    /// snapshot never diverge: an operation fully succeeds or fully fails.
    #[error("failed to {operation}: {reason}")]
    Persist { operation: String, reason: String },
}

impl CartError {
    /// Creates a Lookup error for a failed add.
    pub fn failed_add(reason: impl Into<String>) -> Self {
        CartError::Lookup {
            operation: "add product".to_string(),
            reason: reason.into(),
        }
    }

    /// Creates a Lookup error for a failed amount update.
    pub fn failed_update(reason: impl Into<String>) -> Self {
        CartError::Lookup {
            operation: "update product quantity".to_string(),
            reason: reason.into(),
        }
    }

    /// Creates a Persist error for a failed snapshot write.
    pub fn failed_persist(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        CartError::Persist {
            operation: operation.into(),
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CartError.
pub type CartResult<T> = Result<T, CartError>;

// =============================================================================
// Unit Tests
// =============================================================================
