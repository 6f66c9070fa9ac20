//! Route definitions for the admin back office

use dioxus::prelude::*;

use crate::components::AdminLayout;
use crate::pages::admin::{
    AdminDashboard, AdminLogin, AlternativeDetail, AlternativeNew, CategoryDetail, CategoryNew,
    LicenseDetail, LicenseNew, ToolDetail, ToolNew,
};

/// All application routes
#[derive(Clone, Debug, PartialEq, Routable)]
#[rustfmt::skip]
pub enum Route {
    #[nest("/admin")]
        #[route("/login")]
        AdminLogin {},

        #[layout(AdminLayout)]
            #[route("/dashboard")]
            AdminDashboard {},

            #[route("/tools/new")]
            ToolNew {},

            #[route("/tools/:slug")]
            ToolDetail { slug: String },

            #[route("/alternatives/new")]
            AlternativeNew {},

            #[route("/alternatives/:slug")]
            AlternativeDetail { slug: String },

            #[route("/categories/new")]
            CategoryNew {},

            #[route("/categories/:slug")]
            CategoryDetail { slug: String },

            #[route("/licenses/new")]
            LicenseNew {},

            #[route("/licenses/:slug")]
            LicenseDetail { slug: String },
}
