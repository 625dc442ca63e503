pub mod calendar;
pub mod codec;
pub mod errors;
pub mod models;
pub mod records;
pub mod storage;
pub mod store;

pub use calendar::{days_array, DEFAULT_WINDOW_DAYS};
pub use codec::{decode, encode, try_decode};
pub use errors::{CodecError, StoreError};
pub use models::{CalendarDate, PackedHabit, Record, SerializedStore, SortOrder};
pub use records::{
    add_habit_window, add_habit_window_at, by_name, fill_missing_days, remove_by_name,
    sort_by_date, unique_names, upsert_checked,
};
pub use storage::{resolve_data_path, FileStore, KeyValueStore, MemoryStore};
pub use store::{HabitStore, DEBUG_STORAGE_KEY, STORAGE_KEY};
