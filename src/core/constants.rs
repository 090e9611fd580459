//! Fixed user-facing strings. The product ships a Vietnamese interface,
//! so everything the user reads lives here rather than inline in the UI.

pub const STATUS_READY: &str = "Sẵn sàng trò chuyện";
pub const STATUS_PROCESSING: &str = "Đang xử lý...";
pub const STATUS_ERROR: &str = "Có lỗi xảy ra";
pub const STATUS_CONNECTION_ERROR: &str = "Lỗi kết nối";
pub const STATUS_RECORDING: &str = "Đang ghi âm...";
pub const STATUS_CLEARED: &str = "Đã xóa cuộc trò chuyện";

pub const CONNECTION_ERROR_MESSAGE: &str = "Không thể kết nối đến server. Vui lòng thử lại.";
pub const SERVER_ERROR_PREFIX: &str = "Lỗi: ";

pub const CLEAR_CONFIRM_PROMPT: &str = "Bạn có chắc muốn xóa toàn bộ cuộc trò chuyện? (y/n)";

pub const EXPORT_EMPTY_NOTICE: &str = "Không có tin nhắn để xuất";
pub const EXPORT_FILE_STEM: &str = "gemini-chat";

pub const VOICE_UNSUPPORTED_NOTICE: &str = "Nhận dạng giọng nói không được hỗ trợ";

pub const ATTACH_STUB_REPLY: &str = "Xin lỗi, tính năng upload file chưa được triển khai.";

pub const EMPTY_STATE_TITLE: &str = "Chào mừng bạn!";
pub const EMPTY_STATE_HINT: &str = "Hãy bắt đầu cuộc trò chuyện với Gemini AI";
pub const TYPING_INDICATOR: &str = "Gemini đang trả lời...";

pub const USER_LABEL: &str = "You";
pub const ASSISTANT_LABEL: &str = "Assistant";

pub const DEFAULT_SERVER_URL: &str = "http://localhost:5000";
pub const DEFAULT_VOICE_LOCALE: &str = "vi-VN";
