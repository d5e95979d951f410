use windows::Win32::Foundation::{ HANDLE, HMODULE, CloseHandle, FreeLibrary };

pub trait ObjectTrait {
    type Object: Copy;
    const INVALID: Self::Object;
    fn is_valid(obj: Self::Object) -> bool;
    fn close(obj: &mut Self::Object);
}

pub struct HandleTrait;

impl ObjectTrait for HandleTrait {
    type Object = HANDLE;

    const INVALID: HANDLE = HANDLE(0);

    fn is_valid(obj: HANDLE) -> bool {
        obj != Self::INVALID
    }

    fn close(obj: &mut HANDLE) {
        unsafe { CloseHandle(*obj) };
        *obj = Self::INVALID;
    }
}

pub struct ModuleTrait;

impl ObjectTrait for ModuleTrait {
    type Object = HMODULE;

    const INVALID: HMODULE = HMODULE(0);

    fn is_valid(obj: HMODULE) -> bool {
        obj != Self::INVALID
    }

    fn close(obj: &mut HMODULE) {
        unsafe { FreeLibrary(*obj) };
        *obj = Self::INVALID;
    }
}



/// Owns a kernel object or a loaded module and releases it on drop.
pub struct Auto<ObjTrait: ObjectTrait> {
    obj: ObjTrait::Object
}

impl<ObjTrait: ObjectTrait> Auto<ObjTrait> {
    pub fn new(obj: ObjTrait::Object) -> Self {
        Self { obj }
    }

    pub fn is_valid(&self) -> bool {
        ObjTrait::is_valid(self.obj)
    }

    pub fn close(&mut self) {
        if self.is_valid() {
            ObjTrait::close(&mut self.obj);
        }
    }

    #[must_use]
    pub fn get(&self) -> ObjTrait::Object {
        self.obj
    }
}

impl<ObjTrait: ObjectTrait> Drop for Auto<ObjTrait> {
    fn drop(&mut self) {
        self.close();
    }
}


pub type Handle = Auto<HandleTrait>;
pub type Module = Auto<ModuleTrait>;
