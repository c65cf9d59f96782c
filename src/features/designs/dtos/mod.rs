mod design_dto;

pub use design_dto::{
    image_extension, is_allowed_image, DesignResponseDto, ListDesignsQuery, SubmitDesignFields,
    SubmitDesignForm, TopDesignsQuery, UploadedImage,
};
