use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        cart::{AddToCartRequest, CartLine, CartList, ClearCartResult, UpdateCartQuantityRequest},
        menus::{CreateMenuRequest, MenuList, PopularMenu, UpdateMenuRequest},
        orders::{
            AdminOrderList, AdminOrderSummary, CheckoutLineRequest, CheckoutSessionRequest,
            CheckoutSessionResponse, CreateOrderRequest, OrderItemRequest, OrderLine, OrderList,
            OrderSummary, OrderWithItems,
        },
        reviews::{CreateReviewRequest, DeleteReviewRequest, ReviewList, UpdateReviewRequest},
        stats::AdminStats,
        users::{
            CreateUserRequest, LinkIdentityRequest, LoginRequest, LoginResponse,
            UpdateUserRequest, UserList,
        },
    },
    models::{CartItem, Menu, Order, OrderItem, Review, User},
    response::{ApiResponse, Meta},
    routes::{cart, health, menus, orders, reviews, stats, users},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        cart::cart_list,
        cart::add_to_cart,
        cart::update_quantity,
        cart::remove_from_cart,
        cart::clear_cart,
        menus::list_menus,
        menus::popular_menus,
        menus::get_menu,
        menus::create_menu,
        menus::update_menu,
        menus::delete_menu,
        orders::create_order,
        orders::list_my_orders,
        orders::list_all_orders,
        orders::create_checkout_session,
        reviews::list_reviews,
        reviews::list_menu_reviews,
        reviews::create_review,
        reviews::update_review,
        reviews::delete_review,
        users::create_user,
        users::login,
        users::list_users,
        users::get_user,
        users::get_user_by_email,
        users::update_user,
        users::delete_user,
        users::link_identity,
        users::resolve_identity,
        stats::admin_stats
    ),
    components(
        schemas(
            User,
            Menu,
            CartItem,
            Order,
            OrderItem,
            Review,
            AddToCartRequest,
            UpdateCartQuantityRequest,
            CartLine,
            CartList,
            ClearCartResult,
            CreateMenuRequest,
            UpdateMenuRequest,
            MenuList,
            PopularMenu,
            CreateOrderRequest,
            OrderItemRequest,
            OrderWithItems,
            OrderLine,
            OrderSummary,
            OrderList,
            AdminOrderSummary,
            AdminOrderList,
            CheckoutLineRequest,
            CheckoutSessionRequest,
            CheckoutSessionResponse,
            CreateReviewRequest,
            UpdateReviewRequest,
            DeleteReviewRequest,
            ReviewList,
            CreateUserRequest,
            UpdateUserRequest,
            LoginRequest,
            LoginResponse,
            LinkIdentityRequest,
            UserList,
            AdminStats,
            Meta,
            ApiResponse<CartList>,
            ApiResponse<OrderWithItems>,
            ApiResponse<OrderList>,
            ApiResponse<Menu>,
            ApiResponse<Review>,
            ApiResponse<User>
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Cart", description = "Cart endpoints"),
        (name = "Menus", description = "Menu catalogue endpoints"),
        (name = "Orders", description = "Order and checkout endpoints"),
        (name = "Reviews", description = "Menu review endpoints"),
        (name = "Users", description = "User and login endpoints"),
        (name = "Stats", description = "Admin dashboard totals"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
