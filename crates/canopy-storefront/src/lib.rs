//! Customer-facing storefront state: the cart, the header's dropdown menus,
//! and the concierge chat widget.

pub mod cart;
pub mod chat;
pub mod error;
pub mod header;
pub mod menus;

pub use cart::{Cart, CartItem, DrawerLine};
pub use chat::{
    ChatMessage, ChatSession, ChatStatus, Responder, ScriptedResponder, Sender, HELP_PROMPT,
};
pub use error::CartError;
pub use header::StorefrontHeader;
pub use menus::{CloseDelays, MenuController, MenuKind};
