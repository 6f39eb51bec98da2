pub mod navbar_view;
