//! 预导入模块，方便使用

pub use super::contents::{
    ActiveModel as ContentActiveModel, Entity as Contents, Model as ContentModel,
};
pub use super::courses::{ActiveModel as CourseActiveModel, Entity as Courses, Model as CourseModel};
pub use super::item_files::{Entity as ItemFiles, Model as ItemFileModel};
pub use super::item_images::{Entity as ItemImages, Model as ItemImageModel};
pub use super::item_texts::{Entity as ItemTexts, Model as ItemTextModel};
pub use super::item_videos::{Entity as ItemVideos, Model as ItemVideoModel};
pub use super::modules::{ActiveModel as ModuleActiveModel, Entity as Modules, Model as ModuleModel};
pub use super::subjects::{
    ActiveModel as SubjectActiveModel, Entity as Subjects, Model as SubjectModel,
};
pub use super::uploads::{ActiveModel as UploadActiveModel, Entity as Uploads, Model as UploadModel};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};
