use eframe::egui::Color32;

pub const LIGHT_HOUSING: Color32 = Color32::from_rgb(38, 40, 46);
pub const RED_ON: Color32 = Color32::from_rgb(230, 57, 70);
pub const RED_OFF: Color32 = Color32::from_rgb(78, 34, 38);
pub const GREEN_ON: Color32 = Color32::from_rgb(46, 204, 113);
pub const GREEN_OFF: Color32 = Color32::from_rgb(30, 66, 44);
pub const CAR: Color32 = Color32::from_rgb(88, 101, 242);
pub const CONNECTED: Color32 = Color32::from_rgb(35, 165, 90);
pub const DISCONNECTED: Color32 = Color32::from_rgb(150, 150, 150);
pub const ERROR_TEXT: Color32 = Color32::from_rgb(240, 71, 71);
