use canopy_core::AppConfig;

use crate::cart::Cart;
use crate::chat::{ChatSession, Responder, ScriptedResponder};
use crate::menus::{CloseDelays, MenuController, MenuKind};

/// The storefront header: dropdown menus, the cart drawer, and the
/// concierge chat.
pub struct StorefrontHeader<R = ScriptedResponder> {
    pub menus: MenuController,
    pub cart: Cart,
    pub chat: ChatSession<R>,
}

impl StorefrontHeader<ScriptedResponder> {
    /// A header with the scripted concierge and delays from `config`.
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self::with_responder(config, ScriptedResponder)
    }
}

impl<R: Responder> StorefrontHeader<R> {
    pub fn with_responder(config: &AppConfig, responder: R) -> Self {
        Self {
            menus: MenuController::new(CloseDelays {
                shop: config.shop_close_delay(),
                cart: config.cart_close_delay(),
            }),
            cart: Cart::new(),
            chat: ChatSession::new(responder, config.chat_reply_delay()),
        }
    }

    /// Number on the cart icon. Hidden when the cart is empty.
    #[must_use]
    pub fn cart_badge(&self) -> Option<u32> {
        let count = self.cart.item_count();
        (count > 0).then_some(count)
    }

    /// The cart drawer's "Checkout" button: the drawer closes and the cart
    /// stays intact for the checkout page.
    pub fn begin_checkout(&self) {
        self.menus.close(MenuKind::Cart);
    }
}
