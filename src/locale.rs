//! Vietnamese UI text. The application ships a single locale.

pub const APP_TITLE: &str = "Khảo sát ý kiến phụ huynh";
pub const PARENT_VIEW: &str = "Phụ huynh";
pub const ADMIN_VIEW: &str = "Quản trị";
pub const LOGOUT: &str = "Đăng xuất";

pub const FORM_TITLE: &str = "Phiếu khảo sát mức độ hài lòng";
pub const FORM_DESCRIPTION: &str =
    "Ý kiến của quý phụ huynh giúp nhà trường nâng cao chất lượng chăm sóc và giáo dục trẻ.";
pub const HOTLINE: &str = "Đường dây nóng: 0123 456 789";
pub const CLASS_SELECT_LABEL: &str = "Chọn lớp của con";
pub const CLASS_SELECT_PLACEHOLDER: &str = "-- Chọn lớp --";
pub const ALREADY_REVIEWED_SUFFIX: &str = " (đã gửi)";
pub const SATISFACTION_TITLE: &str = "Mức độ hài lòng";
pub const SATISFIED: &str = "Hài lòng";
pub const UNSATISFIED: &str = "Chưa hài lòng";
pub const OTHER_COMMENTS_TITLE: &str = "Ý kiến khác";
pub const COMMENT_PLACEHOLDER: &str = "Nhập ý kiến của quý phụ huynh...";
pub const SUBMIT_BUTTON: &str = "Gửi đánh giá";
pub const SUBMITTING: &str = "Đang gửi...";
pub const VERIFYING_CONNECTION: &str = "Đang kiểm tra kết nối...";
pub const RETRY_CONNECTION: &str = "Thử lại kết nối";
pub const SUCCESS_MESSAGE: &str = "Cảm ơn quý phụ huynh đã gửi đánh giá!";

pub const ERR_CLASS_MISSING: &str = "Vui lòng chọn lớp.";
pub const ERR_CLASS_UNKNOWN: &str = "Lớp đã chọn không có trong danh sách.";
pub const ERR_RATING_MISSING: &str = "Vui lòng đánh giá tất cả các mục.";
pub const ERR_COMMENT_MISSING: &str = "Vui lòng nhập ý kiến.";
pub const ERR_IP_LIMIT: &str = "Bạn đã gửi đánh giá cho lớp này rồi.";
pub const ERR_VPN_OR_PROXY: &str =
    "Vui lòng tắt VPN/Proxy và sử dụng kết nối tại Việt Nam để gửi đánh giá.";
pub const ERR_UNVERIFIED: &str = "Không thể xác minh kết nối của bạn. Vui lòng thử lại sau.";
pub const ERR_API: &str = "Đã có lỗi xảy ra. Vui lòng thử lại.";
pub const ERR_LOGIN: &str = "Tên đăng nhập hoặc mật khẩu không đúng.";
pub const ERR_USERNAME_EXISTS: &str = "Tên đăng nhập đã tồn tại.";
pub const ERR_CREDENTIALS_BLANK: &str = "Tên đăng nhập và mật khẩu không được để trống.";
pub const ERR_PASSWORDS_DIFFER: &str = "Mật khẩu xác nhận không khớp.";
pub const ERR_PASSWORD_TOO_SHORT: &str = "Mật khẩu phải có ít nhất 6 ký tự.";
pub const ERR_PASSWORD_UPDATE: &str = "Không thể cập nhật mật khẩu.";
pub const ERR_FORBIDDEN: &str = "Bạn không có quyền thực hiện thao tác này.";

pub const LOGIN_TITLE: &str = "Đăng nhập để xem kết quả khảo sát";
pub const USERNAME: &str = "Tên đăng nhập";
pub const PASSWORD: &str = "Mật khẩu";
pub const LOGIN_BUTTON: &str = "Đăng nhập";
pub const LOGGING_IN: &str = "Đang đăng nhập...";

pub const DASHBOARD_TITLE: &str = "Kết quả khảo sát";
pub const TOTAL_REVIEWS: &str = "Tổng số đánh giá";
pub const ALL_CLASSES: &str = "Tất cả các lớp";
pub const CLASS_PREFIX: &str = "Lớp";
pub const EXPORT_BUTTON: &str = "Xuất Excel";
pub const RESET_BUTTON: &str = "Xóa tất cả đánh giá";
pub const RESET_CONFIRMATION: &str =
    "Bạn có chắc chắn muốn xóa TẤT CẢ đánh giá? Thao tác này không thể hoàn tác.";
pub const DELETE_REVIEW_CONFIRMATION: &str = "Bạn có chắc chắn muốn xóa đánh giá này?";
pub const DELETE_IP_LOG_CONFIRMATION: &str = "Bạn có chắc chắn muốn xóa bản ghi này?";
pub const DELETE_ADMIN_CONFIRMATION: &str = "Bạn có chắc chắn muốn xóa tài khoản này?";
pub const NO_REVIEWS: &str = "Chưa có đánh giá nào.";
pub const LOADING: &str = "Đang tải...";
pub const REVIEW_UNIT: &str = "đánh giá";

pub const USER_MANAGEMENT_TITLE: &str = "Quản lý tài khoản quản trị";
pub const NEW_USERNAME: &str = "Tên đăng nhập mới";
pub const NEW_PASSWORD: &str = "Mật khẩu mới";
pub const CONFIRM_PASSWORD: &str = "Xác nhận mật khẩu";
pub const ADD_ADMIN_BUTTON: &str = "Thêm quản trị viên";
pub const DELETE_ADMIN_BUTTON: &str = "Xóa";
pub const NO_ADMINS: &str = "Chưa có quản trị viên nào.";
pub const USER_ADDED: &str = "Đã thêm quản trị viên.";
pub const USER_DELETED: &str = "Đã xóa quản trị viên.";

pub const CHANGE_PASSWORD_BUTTON: &str = "Đổi mật khẩu";
pub const SAVE_PASSWORD_BUTTON: &str = "Lưu mật khẩu";
pub const SAVING: &str = "Đang lưu...";
pub const CANCEL: &str = "Hủy";
pub const PASSWORD_CHANGED: &str = "Đổi mật khẩu thành công.";

pub const IP_MONITORING_TITLE: &str = "Theo dõi IP gửi trùng";
pub const NO_IP_LOGS: &str = "Chưa có lượt gửi trùng nào.";
pub const DELETE: &str = "Xóa";

pub const EXPORT_COL_CLASS: &str = "Lớp";
pub const EXPORT_COL_TIME: &str = "Thời gian";
pub const EXPORT_COL_IP: &str = "Địa chỉ IP";
pub const EXPORT_COL_COMMENT: &str = "Ý kiến khác";
pub const EXPORT_FILE_PREFIX: &str = "Danh_sach_danh_gia_";
pub const OVERVIEW_CHART_TITLE: &str = "Biểu đồ tổng quan";
pub const NO_REVIEWS_FOR_CLASS: &str = "Không có đánh giá nào cho lớp";
