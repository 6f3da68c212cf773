mod room_outline;

pub use room_outline::RoomOutline;
