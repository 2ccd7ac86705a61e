pub mod cursor_vis3d;
