//! UI module - small painted building blocks shared by the widgets

pub mod components;
